//! Renderer module
//!
//! Renders entries, indexes, slices and JSON values to the output formats:
//! jsonl, json, md, raw

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

use crate::core::model::{Entry, StringSlice};
use crate::search::index::SearchIndex;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    /// Colour matched slices in raw output
    pub color: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
            color: true,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}

/// Renderer for pipeline output
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render entries, one per line in jsonl
    pub fn render_entries(&self, entries: &[Entry]) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(entries),
            OutputFormat::Json => self.render_json(entries),
            OutputFormat::Markdown => render_entries_markdown(entries),
            OutputFormat::Raw => entries
                .iter()
                .map(|entry| match &entry.formatted_value {
                    Some(value) => format!("{}\t{}", entry.path, value),
                    None => entry.path.clone(),
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Render a search index; jsonl emits one record per line
    pub fn render_index(&self, index: &SearchIndex) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(index.records()),
            OutputFormat::Json => self.render_json(index),
            OutputFormat::Markdown => {
                let mut output = String::from("## Search Index\n\n");
                output.push_str(&format!("- Fingerprint: `{}`\n", index.fingerprint()));
                output.push_str(&format!("- Records: {}\n", index.len()));
                let keys: Vec<_> = index.keys().iter().map(|k| k.key.as_str()).collect();
                output.push_str(&format!("- Keys: {}\n", keys.join(", ")));
                output
            }
            OutputFormat::Raw => index.fingerprint().to_string(),
        }
    }

    /// Render highlighted slices
    pub fn render_slices(&self, slices: &[StringSlice]) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(slices),
            OutputFormat::Json => self.render_json(slices),
            OutputFormat::Markdown => slices
                .iter()
                .map(|s| {
                    if s.is_match {
                        format!("**{}**", s.slice)
                    } else {
                        s.slice.clone()
                    }
                })
                .collect(),
            OutputFormat::Raw => slices
                .iter()
                .map(|s| match (s.is_match, self.config.color) {
                    (true, true) => s.slice.yellow().bold().to_string(),
                    (true, false) => format!("[{}]", s.slice),
                    (false, _) => s.slice.clone(),
                })
                .collect(),
        }
    }

    /// Render a JSON node
    pub fn render_value(&self, value: &Value) -> String {
        match self.config.format {
            OutputFormat::Jsonl | OutputFormat::Json => self.render_json(value),
            OutputFormat::Markdown => {
                let body = serde_json::to_string_pretty(value).unwrap_or_default();
                format!("```json\n{}\n```\n", body)
            }
            OutputFormat::Raw => match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }

    /// Render to a writer
    pub fn write_to<W: Write>(&self, output: &str, mut writer: W) -> std::io::Result<()> {
        if output.is_empty() {
            return Ok(());
        }
        writeln!(writer, "{}", output)
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl<T: Serialize>(&self, items: &[T]) -> String {
        items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON document
    fn render_json<T: Serialize + ?Sized>(&self, value: &T) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
        } else {
            serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
        }
    }
}

fn render_entries_markdown(entries: &[Entry]) -> String {
    let mut output = String::from("## Entries\n\n");

    for entry in entries {
        output.push_str(&format!("- `{}`", entry.path));
        match (&entry.raw_value, &entry.formatted_value) {
            (Some(raw), Some(formatted)) if raw != formatted => {
                output.push_str(&format!(": {} (`{}`)", formatted, raw));
            }
            (_, Some(formatted)) => output.push_str(&format!(": {}", formatted)),
            _ => {}
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::index::create_search_index;
    use serde_json::json;

    fn sample_entries() -> Vec<Entry> {
        vec![
            Entry::container("$.records"),
            Entry::leaf(
                "$.records.0",
                "2020-01-01T00:00:00.000Z",
                "Jan 1, 2020, 12:00:00 AM GMT",
            ),
            Entry::leaf("$.records.1", "USD", "USD"),
        ]
    }

    fn sample_slices() -> Vec<StringSlice> {
        vec![
            StringSlice::new(0, 4, false, "The "),
            StringSlice::new(4, 9, true, "quick"),
            StringSlice::new(9, 13, false, " fox"),
        ]
    }

    #[test]
    fn test_render_entries_jsonl() {
        let output = Renderer::new(OutputFormat::Jsonl).render_entries(&sample_entries());
        assert_eq!(output.lines().count(), 3);
        assert_eq!(output.lines().next(), Some(r#"{"path":"$.records"}"#));
    }

    #[test]
    fn test_render_entries_json() {
        let output = Renderer::new(OutputFormat::Json).render_entries(&sample_entries());
        assert!(output.starts_with('['));
        assert!(output.ends_with(']'));
        let parsed: Vec<Entry> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, sample_entries());
    }

    #[test]
    fn test_render_entries_pretty_jsonl() {
        let config = RenderConfig::new(OutputFormat::Jsonl).with_pretty(true);
        let output = Renderer::with_config(config).render_entries(&sample_entries());
        assert!(output.contains("\n\n"));
        assert!(output.contains("  \"path\""));
    }

    #[test]
    fn test_render_entries_markdown() {
        let output = Renderer::new(OutputFormat::Markdown).render_entries(&sample_entries());
        assert!(output.starts_with("## Entries"));
        assert!(output.contains("- `$.records`\n"));
        assert!(output
            .contains("- `$.records.0`: Jan 1, 2020, 12:00:00 AM GMT (`2020-01-01T00:00:00.000Z`)"));
        assert!(output.contains("- `$.records.1`: USD\n"));
    }

    #[test]
    fn test_render_entries_raw() {
        let output = Renderer::new(OutputFormat::Raw).render_entries(&sample_entries());
        assert_eq!(
            output,
            "$.records\n$.records.0\tJan 1, 2020, 12:00:00 AM GMT\n$.records.1\tUSD"
        );
    }

    #[test]
    fn test_render_slices_markdown() {
        let output = Renderer::new(OutputFormat::Markdown).render_slices(&sample_slices());
        assert_eq!(output, "The **quick** fox");
    }

    #[test]
    fn test_render_slices_raw_without_color() {
        let config = RenderConfig::new(OutputFormat::Raw).with_color(false);
        let output = Renderer::with_config(config).render_slices(&sample_slices());
        assert_eq!(output, "The [quick] fox");
    }

    #[test]
    fn test_render_slices_raw_with_color_keeps_text() {
        let output = Renderer::new(OutputFormat::Raw).render_slices(&sample_slices());
        assert!(output.starts_with("The "));
        assert!(output.contains("quick"));
        assert!(output.ends_with(" fox"));
    }

    #[test]
    fn test_render_slices_jsonl() {
        let output = Renderer::new(OutputFormat::Jsonl).render_slices(&sample_slices());
        let parsed: Vec<StringSlice> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(parsed, sample_slices());
    }

    #[test]
    fn test_render_index() {
        let (index, _) = create_search_index(&json!({"a": 1, "b": [true]}));

        let jsonl = Renderer::new(OutputFormat::Jsonl).render_index(&index);
        assert_eq!(jsonl.lines().count(), index.len());

        let json = Renderer::new(OutputFormat::Json).render_index(&index);
        let parsed: SearchIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, index);

        let md = Renderer::new(OutputFormat::Markdown).render_index(&index);
        assert!(md.contains("- Records: 3"));
        assert!(md.contains("- Keys: path, rawValue, formattedValue"));

        let raw = Renderer::new(OutputFormat::Raw).render_index(&index);
        assert_eq!(raw, index.fingerprint());
    }

    #[test]
    fn test_render_value() {
        let value = json!({"name": "Jane"});
        assert_eq!(
            Renderer::new(OutputFormat::Json).render_value(&value),
            r#"{"name":"Jane"}"#
        );
        assert!(Renderer::new(OutputFormat::Markdown)
            .render_value(&value)
            .starts_with("```json\n"));
        assert_eq!(
            Renderer::new(OutputFormat::Raw).render_value(&json!("Jane")),
            "Jane"
        );
        assert_eq!(Renderer::new(OutputFormat::Raw).render_value(&json!(10.5)), "10.5");
    }

    #[test]
    fn test_write_to() {
        let renderer = Renderer::new(OutputFormat::Raw);
        let mut buffer = Vec::new();
        renderer.write_to("line", &mut buffer).unwrap();
        assert_eq!(buffer, b"line\n");

        let mut buffer = Vec::new();
        renderer.write_to("", &mut buffer).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(
            "jsonl".parse::<OutputFormat>().unwrap(),
            OutputFormat::Jsonl
        );
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            "md".parse::<OutputFormat>().unwrap(),
            OutputFormat::Markdown
        );
        assert_eq!("raw".parse::<OutputFormat>().unwrap(), OutputFormat::Raw);
    }

    #[test]
    fn test_output_format_parse_case_insensitive() {
        assert_eq!("JSONL".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("MARKDOWN".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
    }

    #[test]
    fn test_output_format_parse_invalid() {
        let result = "invalid".parse::<OutputFormat>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unknown format"));
    }

    #[test]
    fn test_render_config_default() {
        let config = RenderConfig::default();
        assert_eq!(config.format, OutputFormat::Jsonl);
        assert!(!config.pretty);
        assert!(config.color);
    }
}
