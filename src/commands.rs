//! Command handlers - read input, run the pipeline, print rendered output

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::core::model::MatchRange;
use crate::core::render::{RenderConfig, Renderer};
use crate::search::index::create_search_index;
use crate::search::slices::string_slices;
use crate::search::walk::{create_search_entries, resolve_path, to_json_pointer};

/// Read and parse a JSON document from a file, or stdin for `-`
pub fn read_document(input: &Path) -> Result<Value> {
    let content = if input.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read JSON from stdin")?;
        buffer
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("Failed to read file: {:?}", input))?
    };

    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {:?}", input))
}

/// Parse match range string (format: "start:end", inclusive)
pub fn parse_match_range(s: &str) -> Result<MatchRange> {
    let Some((start, end)) = s.split_once(':') else {
        bail!("Invalid match range format. Expected 'start:end', got '{}'", s);
    };

    let start: usize = start
        .trim()
        .parse()
        .with_context(|| format!("Invalid match start: {}", start))?;
    let end: usize = end
        .trim()
        .parse()
        .with_context(|| format!("Invalid match end: {}", end))?;

    Ok(MatchRange::new(start, end))
}

fn print_output(renderer: &Renderer, output: &str) -> Result<()> {
    renderer
        .write_to(output, io::stdout().lock())
        .context("Failed to write output")
}

/// Run the entries command
pub fn run_entries(input: &Path, config: RenderConfig) -> Result<()> {
    let document = read_document(input)?;
    let entries = create_search_entries(&document);

    let renderer = Renderer::with_config(config);
    print_output(&renderer, &renderer.render_entries(&entries))
}

/// Run the index command
pub fn run_index(input: &Path, config: RenderConfig) -> Result<()> {
    let document = read_document(input)?;
    let (index, _) = create_search_index(&document);

    let renderer = Renderer::with_config(config);
    print_output(&renderer, &renderer.render_index(&index))
}

/// Run the lookup command
pub fn run_lookup(input: &Path, path: &str, pointer: bool, config: RenderConfig) -> Result<()> {
    let document = read_document(input)?;
    let renderer = Renderer::with_config(config);

    let Some(node) = resolve_path(&document, path)? else {
        bail!("No node at path {}", path);
    };

    if pointer {
        return print_output(&renderer, &to_json_pointer(path)?);
    }

    print_output(&renderer, &renderer.render_value(node))
}

/// Run the highlight command
pub fn run_highlight(
    text: &str,
    matches: &[String],
    max_length: usize,
    config: RenderConfig,
) -> Result<()> {
    let ranges = matches
        .iter()
        .map(|m| parse_match_range(m))
        .collect::<Result<Vec<_>>>()?;
    let slices = string_slices(text, &ranges, max_length)?;

    let renderer = Renderer::with_config(config);
    print_output(&renderer, &renderer.render_slices(&slices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_match_range() {
        assert_eq!(parse_match_range("9:16").unwrap(), MatchRange::new(9, 16));
        assert_eq!(parse_match_range(" 0 : 0 ").unwrap(), MatchRange::new(0, 0));
        assert!(parse_match_range("9").is_err());
        assert!(parse_match_range("a:3").is_err());
        assert!(parse_match_range("3:-1").is_err());
    }

    #[test]
    fn test_inverted_match_range_is_left_to_the_windower() {
        // Parsing accepts it; slicing reports the contract violation
        let range = parse_match_range("5:2").unwrap();
        assert!(string_slices("some text", &[range], 60).is_err());
    }

    #[test]
    fn test_read_document() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("doc.json");
        fs::write(&path, r#"{"b": 1, "a": [true]}"#).unwrap();

        let document = read_document(&path).unwrap();
        let keys: Vec<_> = document.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_read_document_errors() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("missing.json");
        let err = read_document(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));

        let invalid = temp.path().join("invalid.json");
        fs::write(&invalid, "{not json").unwrap();
        let err = read_document(&invalid).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_run_highlight_rejects_out_of_bounds() {
        let err = run_highlight("abc", &["1:5".to_string()], 60, RenderConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("out of bounds"));
    }
}
