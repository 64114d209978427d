//! Error types for the search pipeline

use thiserror::Error;

use crate::core::model::IndexKey;

/// Errors raised while turning match ranges into slices
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliceError {
    #[error("match range [{start}, {end}] is inverted: start must be <= end")]
    InvertedRange { start: usize, end: usize },

    #[error("match range [{start}, {end}] is out of bounds for text of {len} characters")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("entry has no {0} to highlight")]
    MissingField(IndexKey),
}

/// Errors raised while parsing an entry path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path must start with '$': {0:?}")]
    MissingRoot(String),

    #[error("path ends with a dangling escape: {0:?}")]
    DanglingEscape(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_error_messages() {
        let err = SliceError::OutOfBounds {
            start: 3,
            end: 40,
            len: 10,
        };
        assert_eq!(
            err.to_string(),
            "match range [3, 40] is out of bounds for text of 10 characters"
        );

        let err = SliceError::MissingField(IndexKey::RawValue);
        assert_eq!(err.to_string(), "entry has no rawValue to highlight");
    }

    #[test]
    fn test_path_error_messages() {
        let err = PathError::MissingRoot("records.0".to_string());
        assert_eq!(err.to_string(), "path must start with '$': \"records.0\"");
    }
}
