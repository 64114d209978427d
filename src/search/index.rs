//! Search index construction
//!
//! Builds the pre-computed structure a fuzzy-matching engine consumes next
//! to the flat entry list, so the engine does not re-tokenise every entry
//! per query. The index is derived only from the three indexable fields of
//! each entry. No matching, filtering or ranking happens here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::model::{Entry, IndexKey};
use crate::core::util::Fingerprint;
use crate::search::walk::create_search_entries;

/// A searchable key and its relative weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeySpec {
    pub key: IndexKey,
    pub weight: f64,
}

/// One present field of an entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedField {
    key: IndexKey,
    value: String,
    /// Field-length norm, `1 / sqrt(token count)` rounded to 3 decimals
    norm: f64,
}

impl IndexedField {
    pub fn key(&self) -> IndexKey {
        self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }
}

/// Indexed fields of the entry at position `idx`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    idx: usize,
    fields: Vec<IndexedField>,
}

impl IndexRecord {
    /// Position of the entry in the entry list
    pub fn idx(&self) -> usize {
        self.idx
    }

    pub fn fields(&self) -> &[IndexedField] {
        &self.fields
    }

    pub fn field(&self, key: IndexKey) -> Option<&IndexedField> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Pre-built index over an entry list.
///
/// Immutable once built; rebuild it whenever the entries change
/// (see [`SearchIndex::is_current_for`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIndex {
    keys: Vec<KeySpec>,
    records: Vec<IndexRecord>,
    fingerprint: String,
}

impl SearchIndex {
    /// Build an index over `entries`, every key weighted equally
    pub fn from_entries(entries: &[Entry]) -> Self {
        let keys = IndexKey::ALL
            .iter()
            .map(|&key| KeySpec { key, weight: 1.0 })
            .collect();

        let records = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| IndexRecord {
                idx,
                fields: IndexKey::ALL
                    .iter()
                    .filter_map(|&key| {
                        entry.field(key).map(|value| IndexedField {
                            key,
                            value: value.to_string(),
                            norm: field_norm(value),
                        })
                    })
                    .collect(),
            })
            .collect();

        let index = Self {
            keys,
            records,
            fingerprint: fingerprint_entries(entries),
        };

        debug!(
            records = index.records.len(),
            fingerprint = %index.fingerprint,
            "built search index"
        );
        index
    }

    pub fn keys(&self) -> &[KeySpec] {
        &self.keys
    }

    pub fn records(&self) -> &[IndexRecord] {
        &self.records
    }

    /// Digest of the entries this index was built from
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether this index was built from exactly these entries
    pub fn is_current_for(&self, entries: &[Entry]) -> bool {
        self.records.len() == entries.len() && self.fingerprint == fingerprint_entries(entries)
    }
}

/// Walk a document and index its entries, returning both
pub fn create_search_index(document: &Value) -> (SearchIndex, Vec<Entry>) {
    let entries = create_search_entries(document);
    let index = SearchIndex::from_entries(&entries);
    (index, entries)
}

/// A matching engine that accepts a pre-built index.
///
/// Thresholds, distance, case sensitivity and similar knobs belong to the
/// engine and travel in `Options`.
pub trait IndexedEngine: Sized {
    type Options;

    fn with_index(entries: Vec<Entry>, index: SearchIndex, options: Self::Options) -> Self;
}

/// Build entries and index for `document` and hand both to an engine
pub fn create_engine<E: IndexedEngine>(document: &Value, options: E::Options) -> E {
    let (index, entries) = create_search_index(document);
    E::with_index(entries, index, options)
}

/// Field-length norm over space-separated tokens
pub fn field_norm(value: &str) -> f64 {
    let tokens = value.split(' ').filter(|t| !t.is_empty()).count().max(1);
    ((1.0 / (tokens as f64).sqrt()) * 1000.0).round() / 1000.0
}

fn fingerprint_entries(entries: &[Entry]) -> String {
    let mut fingerprint = Fingerprint::new();
    for entry in entries {
        for key in IndexKey::ALL {
            fingerprint.field(entry.field(key));
        }
    }
    fingerprint.finish()
}
