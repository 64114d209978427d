//! JSON walker
//!
//! Flattens a document into one [`Entry`] per node, depth-first and
//! pre-order. Paths start at `$` and append `.key` for object members and
//! `.index` for array elements, e.g. `$.records.0.orders.1.currency`.
//!
//! Keys containing `.` or `\` are escaped (`\.`, `\\`) so every path stays
//! unique and can be parsed back into its segments.

use serde_json::Value;
use std::borrow::Cow;
use tracing::debug;

use crate::core::error::PathError;
use crate::core::model::Entry;
use crate::search::format::format_value;

/// Path of the document root. The root itself never gets an entry.
pub const ROOT_PATH: &str = "$";

/// Walk a document and return its entries in traversal order
pub fn create_search_entries(document: &Value) -> Vec<Entry> {
    let mut entries = Vec::new();
    walk_children(document, ROOT_PATH, &mut entries);

    debug!(entries = entries.len(), "walked json document");
    entries
}

fn walk_children(node: &Value, path: &str, entries: &mut Vec<Entry>) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                visit(child, join_path(path, &escape_segment(key)), entries);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                visit(child, join_path(path, &index.to_string()), entries);
            }
        }
        _ => {}
    }
}

fn visit(node: &Value, path: String, entries: &mut Vec<Entry>) {
    match node {
        Value::Object(_) | Value::Array(_) => {
            entries.push(Entry::container(path.clone()));
            walk_children(node, &path, entries);
        }
        leaf => {
            let (raw_value, formatted_value) = format_value(Some(leaf));
            entries.push(Entry {
                path,
                raw_value,
                formatted_value,
            });
        }
    }
}

fn join_path(parent: &str, segment: &str) -> String {
    let mut path = String::with_capacity(parent.len() + segment.len() + 1);
    path.push_str(parent);
    path.push('.');
    path.push_str(segment);
    path
}

/// Escape an object key for use as a path segment
pub fn escape_segment(key: &str) -> Cow<'_, str> {
    if key.contains(['.', '\\']) {
        Cow::Owned(key.replace('\\', "\\\\").replace('.', "\\."))
    } else {
        Cow::Borrowed(key)
    }
}

/// Split a path into its unescaped segments, excluding the leading `$`
pub fn parse_path(path: &str) -> Result<Vec<String>, PathError> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => return Err(PathError::DanglingEscape(path.to_string())),
            },
            '.' => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);

    let mut segments = segments.into_iter();
    match segments.next() {
        Some(root) if root == ROOT_PATH => Ok(segments.collect()),
        _ => Err(PathError::MissingRoot(path.to_string())),
    }
}

/// Find the node a path points at, or `None` if the document has no such node
pub fn resolve_path<'a>(document: &'a Value, path: &str) -> Result<Option<&'a Value>, PathError> {
    let mut node = document;

    for segment in parse_path(path)? {
        let next = match node {
            Value::Object(map) => map.get(segment.as_str()),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };

        match next {
            Some(child) => node = child,
            None => return Ok(None),
        }
    }

    Ok(Some(node))
}

// JSON Pointer token escape (~0, ~1)
fn escape_pointer_token(raw: &str) -> String {
    raw.replace('~', "~0").replace('/', "~1")
}

/// Convert a path to an RFC 6901 JSON Pointer (`$` becomes `""`)
pub fn to_json_pointer(path: &str) -> Result<String, PathError> {
    Ok(parse_path(path)?
        .iter()
        .map(|segment| format!("/{}", escape_pointer_token(segment)))
        .collect())
}
