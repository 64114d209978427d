//! Search pipeline
//!
//! - [`format`] - raw/formatted rendering of leaf values
//! - [`walk`] - document flattening and path handling
//! - [`index`] - pre-built index for matching engines
//! - [`slices`] - highlight slices from match ranges

pub mod format;
pub mod index;
pub mod slices;
pub mod walk;

pub use format::{format_value, format_value_with, FormatPolicy};
pub use index::{create_engine, create_search_index, IndexedEngine, SearchIndex};
pub use slices::{highlight_match, string_slices};
pub use walk::{create_search_entries, parse_path, resolve_path, to_json_pointer};
