//! jsonsift - flatten JSON documents into searchable entries
//!
//! jsonsift provides:
//! - Path/value entries for every node of a document
//! - A pre-built search index for fuzzy-matching engines
//! - Path lookup back into the document
//! - Highlight slices from match ranges
//! - Unified output format (jsonl/json/md/raw)

use anyhow::Result;
use clap::Parser;

use jsonsift::cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbose, cli.quiet);
    cli::run(cli)
}
