//! The closed union of physical storage kinds
//!
//! Every value reaching the storage layer has already been converted into a
//! [`RawValue`] for one of the four physical column stores. There is no
//! dynamic-type fallback path: a value with no conversion to this union
//! cannot reach the store at all.
//!
//! ## Kind Rules
//!
//! - Four kinds only: Int, Double, Text, Blob
//! - No implicit coercions between kinds; a kind mismatch on read is an
//!   error, not a cast
//! - Status values travel as Int; the status interpretation lives above
//!   this layer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical storage kind — one per typed column store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageKind {
    /// 64-bit signed integer column
    Int,
    /// IEEE-754 double column
    Double,
    /// UTF-8 text column
    Text,
    /// Raw bytes column
    Blob,
}

impl StorageKind {
    /// All kinds, in column-store declaration order.
    pub const ALL: [StorageKind; 4] = [
        StorageKind::Int,
        StorageKind::Double,
        StorageKind::Text,
        StorageKind::Blob,
    ];
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageKind::Int => "int",
            StorageKind::Double => "double",
            StorageKind::Text => "text",
            StorageKind::Blob => "blob",
        };
        f.write_str(name)
    }
}

/// A value in its physical storage form.
///
/// This is the unit the caching layer stores and the column stores persist.
/// NULL is not a variant here: nullability is represented structurally as
/// `Option<RawValue>` by the layers that need it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    /// Integer column value
    Int(i64),
    /// Double column value
    Double(f64),
    /// Text column value
    Text(String),
    /// Blob column value
    Blob(Vec<u8>),
}

impl RawValue {
    /// The storage kind of this value.
    pub fn kind(&self) -> StorageKind {
        match self {
            RawValue::Int(_) => StorageKind::Int,
            RawValue::Double(_) => StorageKind::Double,
            RawValue::Text(_) => StorageKind::Text,
            RawValue::Blob(_) => StorageKind::Blob,
        }
    }

    /// Extract an integer, failing on kind mismatch.
    pub fn into_int(self) -> Result<i64, crate::Error> {
        match self {
            RawValue::Int(v) => Ok(v),
            other => Err(kind_mismatch(StorageKind::Int, &other)),
        }
    }

    /// Extract a double, failing on kind mismatch.
    pub fn into_double(self) -> Result<f64, crate::Error> {
        match self {
            RawValue::Double(v) => Ok(v),
            other => Err(kind_mismatch(StorageKind::Double, &other)),
        }
    }

    /// Extract a string, failing on kind mismatch.
    pub fn into_text(self) -> Result<String, crate::Error> {
        match self {
            RawValue::Text(v) => Ok(v),
            other => Err(kind_mismatch(StorageKind::Text, &other)),
        }
    }

    /// Extract bytes, failing on kind mismatch.
    pub fn into_blob(self) -> Result<Vec<u8>, crate::Error> {
        match self {
            RawValue::Blob(v) => Ok(v),
            other => Err(kind_mismatch(StorageKind::Blob, &other)),
        }
    }
}

fn kind_mismatch(expected: StorageKind, actual: &RawValue) -> crate::Error {
    crate::Error::KindMismatch {
        expected,
        actual: actual.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_reporting() {
        assert_eq!(RawValue::Int(1).kind(), StorageKind::Int);
        assert_eq!(RawValue::Double(1.5).kind(), StorageKind::Double);
        assert_eq!(RawValue::Text("x".into()).kind(), StorageKind::Text);
        assert_eq!(RawValue::Blob(vec![1]).kind(), StorageKind::Blob);
    }

    #[test]
    fn test_extract_matching_kind() {
        assert_eq!(RawValue::Int(7).into_int().unwrap(), 7);
        assert_eq!(RawValue::Text("a".into()).into_text().unwrap(), "a");
        assert_eq!(RawValue::Blob(vec![9]).into_blob().unwrap(), vec![9]);
    }

    #[test]
    fn test_extract_mismatched_kind_is_error() {
        let err = RawValue::Text("a".into()).into_int().unwrap_err();
        assert!(matches!(
            err,
            crate::Error::KindMismatch {
                expected: StorageKind::Int,
                actual: StorageKind::Text,
            }
        ));
    }

    #[test]
    fn test_no_coercion_between_numeric_kinds() {
        assert!(RawValue::Int(1).into_double().is_err());
        assert!(RawValue::Double(1.0).into_int().is_err());
    }
}
