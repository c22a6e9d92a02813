//! Error types for propstore
//!
//! Construction-time errors propagate to the caller. Per-operation errors
//! (conversion overflow, codec failures, kind mismatches) are absorbed at
//! the store boundary through an [`crate::ErrorSink`]: reads report "no
//! value", writes are dropped. The taxonomy below covers both classes; the
//! absorption policy lives in the engine, not here.

use crate::value::StorageKind;
use thiserror::Error;

/// Result type alias for propstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the property store
#[derive(Debug, Error)]
pub enum Error {
    /// A checked numeric conversion would lose magnitude
    #[error("Numeric conversion out of range: {value} does not fit in {target}")]
    NumericRange {
        /// Source value, rendered for diagnostics
        value: String,
        /// Target type name
        target: &'static str,
    },

    /// Status code read back from storage is not a known lifecycle status
    #[error("Unknown instance status code: {0}")]
    UnknownStatus(i64),

    /// A raw value surfaced from the wrong column store
    #[error("Storage kind mismatch: expected {expected}, got {actual}")]
    KindMismatch {
        /// Kind the caller requested
        expected: StorageKind,
        /// Kind actually found
        actual: StorageKind,
    },

    /// Pluggable value codec failed to encode or decode
    #[error("Codec error: {0}")]
    Codec(String),
}

impl Error {
    /// Build a NumericRange error for a value that does not fit `target`.
    pub fn numeric_range(value: impl ToString, target: &'static str) -> Self {
        Error::NumericRange {
            value: value.to_string(),
            target,
        }
    }
}
