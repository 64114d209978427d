//! # jsonsift
//!
//! Turns an arbitrary JSON document into a flat list of searchable entries,
//! each addressed by a stable path and carrying a raw and a human-formatted
//! value, and maps match ranges reported by a fuzzy-matching engine back onto
//! display strings as highlight slices.
//!
//! ## Pipeline
//!
//! document -> [`search::walk`] -> entries -> [`search::index`] ->
//! (index, entries) -> matching engine -> match ranges ->
//! [`search::slices`] -> highlight slices
//!
//! The matching engine itself is external: it implements
//! [`search::IndexedEngine`] and receives the pre-built index.
//!
//! ## Quick Start
//!
//! ```
//! use jsonsift::core::model::MatchRange;
//! use jsonsift::search::{create_search_index, string_slices};
//! use serde_json::json;
//!
//! let document = json!({"name": "John Doe", "updatedAt": "2020-12-02T11:34:00.000Z"});
//! let (index, entries) = create_search_index(&document);
//! assert_eq!(index.len(), entries.len());
//! assert_eq!(
//!     entries[1].formatted_value.as_deref(),
//!     Some("Dec 2, 2020, 11:34:00 AM GMT")
//! );
//!
//! let slices = string_slices("John Doe", &[MatchRange::new(5, 7)], 60).unwrap();
//! assert_eq!(slices[1].slice, "Doe");
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod search;
