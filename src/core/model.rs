//! Search data model
//!
//! Every stage of the pipeline (walker, index builder, engine handoff and
//! slice windower) exchanges the types defined here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three indexable string fields of an [`Entry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexKey {
    Path,
    RawValue,
    FormattedValue,
}

impl IndexKey {
    /// All keys, in index order
    pub const ALL: [IndexKey; 3] = [IndexKey::Path, IndexKey::RawValue, IndexKey::FormattedValue];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKey::Path => "path",
            IndexKey::RawValue => "rawValue",
            IndexKey::FormattedValue => "formattedValue",
        }
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IndexKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(IndexKey::Path),
            "rawValue" | "raw" => Ok(IndexKey::RawValue),
            "formattedValue" | "formatted" => Ok(IndexKey::FormattedValue),
            _ => Err(format!("Unknown index key: {}", s)),
        }
    }
}

/// A searchable record derived from one node of a JSON document.
///
/// Containers (objects and arrays) carry only their path; leaves carry both
/// the raw and the formatted rendering of their value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Dot-delimited address of the node, rooted at `$`
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_value: Option<String>,
}

impl Entry {
    /// Create an entry for an object or array node
    pub fn container(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            raw_value: None,
            formatted_value: None,
        }
    }

    /// Create an entry for a primitive node
    pub fn leaf(
        path: impl Into<String>,
        raw_value: impl Into<String>,
        formatted_value: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            raw_value: Some(raw_value.into()),
            formatted_value: Some(formatted_value.into()),
        }
    }

    pub fn is_container(&self) -> bool {
        self.raw_value.is_none() && self.formatted_value.is_none()
    }

    /// Look up one of the indexable fields
    pub fn field(&self, key: IndexKey) -> Option<&str> {
        match key {
            IndexKey::Path => Some(self.path.as_str()),
            IndexKey::RawValue => self.raw_value.as_deref(),
            IndexKey::FormattedValue => self.formatted_value.as_deref(),
        }
    }
}

/// Inclusive character range `[start, end]` reported by a matching engine.
///
/// Serialized as a two-element array, the shape engines emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
}

impl MatchRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }
}

impl From<(usize, usize)> for MatchRange {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

impl From<[usize; 2]> for MatchRange {
    fn from([start, end]: [usize; 2]) -> Self {
        Self { start, end }
    }
}

impl From<MatchRange> for (usize, usize) {
    fn from(range: MatchRange) -> Self {
        (range.start, range.end)
    }
}

/// The ranges an engine matched inside one field of an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMatch {
    pub key: IndexKey,
    pub indices: Vec<MatchRange>,
}

impl EntryMatch {
    pub fn new(key: IndexKey, indices: impl IntoIterator<Item = MatchRange>) -> Self {
        Self {
            key,
            indices: indices.into_iter().collect(),
        }
    }
}

/// A contiguous run of a display string, flagged as matched or not.
///
/// `start` is inclusive and `end` exclusive, both in characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringSlice {
    pub start: usize,
    pub end: usize,
    pub is_match: bool,
    pub slice: String,
}

impl StringSlice {
    pub fn new(start: usize, end: usize, is_match: bool, slice: impl Into<String>) -> Self {
        Self {
            start,
            end,
            is_match,
            slice: slice.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
