//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::render::{OutputFormat, RenderConfig};

/// jsonsift - flatten JSON documents into searchable entries and render match highlights.
#[derive(Parser, Debug)]
#[command(name = "jsonsift")]
#[command(
    author,
    version,
    about,
    long_about = r#"jsonsift turns a JSON document into a flat list of entries, one per node,
each addressed by a stable path such as $.records.0.orders.1.currency and carrying
a raw and a human-formatted value.

Output formats:
- jsonl: one JSON object per line (best for piping into other tools)
- json: a single JSON document
- md: human-friendly Markdown
- raw: plain text (unstable; intended for terminals)

Examples:
    jsonsift entries data.json
    jsonsift index data.json --format json > data.index.json
    jsonsift lookup data.json '$.records.0.updatedAt'
    jsonsift highlight "This is a really great (short) string" --match 9:16
"#
)]
pub struct Cli {
    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        env = "JSONSIFT_FORMAT",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw\n\n\
Can also be set with the JSONSIFT_FORMAT environment variable."
    )]
    pub format: String,

    /// Disable colored output (when applicable).
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. Matched slices in raw output are wrapped in\n\
[brackets] instead of being highlighted with ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (only errors on stderr).
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        long_help = "Reduce diagnostics to errors only. Note: machine-readable results are still\n\
printed to stdout."
    )]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug diagnostics on stderr. RUST_LOG overrides the level when set."
    )]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on md/raw formats."
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flatten a JSON document into searchable entries.
    #[command(
        long_about = "Walk the document depth-first and emit one entry per node below the root.\n\
Objects and arrays produce an entry with only a path; primitives also carry\n\
rawValue and formattedValue (ISO-8601 timestamps are rendered as dates).\n\n\
Examples:\n\
  jsonsift entries data.json\n\
  cat data.json | jsonsift entries -\n"
    )]
    Entries {
        /// JSON file to read ('-' for stdin).
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Build the pre-built search index for a JSON document.
    #[command(
        long_about = "Build the search index a fuzzy-matching engine consumes alongside the\n\
entries. With --format json the whole index (keys, records, fingerprint) is\n\
emitted; jsonl emits one record per line.\n\n\
Example:\n\
  jsonsift index data.json --format json\n"
    )]
    Index {
        /// JSON file to read ('-' for stdin).
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Resolve an entry path back to its JSON node.
    #[command(long_about = "Print the node an entry path points at.\n\n\
Example:\n\
  jsonsift lookup data.json '$.records.0.orders'\n")]
    Lookup {
        /// JSON file to read ('-' for stdin).
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Entry path, e.g. $.records.0.name
        #[arg(value_name = "PATH")]
        path: String,

        /// Print the RFC 6901 JSON Pointer instead of the node.
        #[arg(long)]
        pointer: bool,
    },

    /// Split a string into matched/unmatched slices.
    #[command(
        long_about = "Map inclusive character ranges reported by a matching engine onto TEXT and\n\
emit ordered slices alternating between unmatched and matched text.\n\
Overlapping and adjacent ranges are merged.\n\n\
Examples:\n\
  jsonsift highlight \"John Doe\" --match 5:7\n\
  jsonsift highlight \"a long value\" --match 0:0 --match 7:11 --max-length 8\n"
    )]
    Highlight {
        /// Display string to slice.
        #[arg(value_name = "TEXT")]
        text: String,

        /// Inclusive match range (format: start:end), repeatable.
        #[arg(long = "match", value_name = "START:END")]
        matches: Vec<String>,

        /// Maximum number of characters to keep.
        #[arg(long, default_value = "60", value_name = "N")]
        max_length: usize,
    },
}

/// Install the stderr diagnostics subscriber
pub fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "error",
        (false, false) => "warn",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    // Parse output format
    let format: OutputFormat = cli.format.parse().map_err(anyhow::Error::msg)?;
    if cli.no_color {
        colored::control::set_override(false);
    }
    let render_config = RenderConfig::new(format)
        .with_pretty(cli.pretty)
        .with_color(!cli.no_color);

    match cli.command {
        Commands::Entries { input } => crate::commands::run_entries(&input, render_config),

        Commands::Index { input } => crate::commands::run_index(&input, render_config),

        Commands::Lookup {
            input,
            path,
            pointer,
        } => crate::commands::run_lookup(&input, &path, pointer, render_config),

        Commands::Highlight {
            text,
            matches,
            max_length,
        } => crate::commands::run_highlight(&text, &matches, max_length, render_config),
    }
}
