//! Point-in-time typed column tables.
//!
//! One `ColumnTable<T>` per physical kind (i64, f64, String, Vec<u8>).
//! Logical schema: `(model, instance, property) -> value NULL`, primary key
//! on the full KeyPath, at most one row per key. A later insert replaces
//! the row in place. Rows are never implicitly deleted.
//!
//! The load-bearing invariant of the optionality-flattening scheme lives
//! here: [`ColumnTable::optional_value`] distinguishes "no row" from "row
//! with NULL".

use parking_lot::RwLock;
use propstore_core::KeyPath;
use std::collections::BTreeMap;

/// Single-value-per-key table specialized to one physical value kind.
///
/// Thread-safe through a coarse `parking_lot::RwLock`; the durable engine
/// behind it is assumed to serialize writers itself.
#[derive(Debug, Default)]
pub struct ColumnTable<T> {
    rows: RwLock<BTreeMap<KeyPath, Option<T>>>,
}

impl<T: Clone> ColumnTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Upsert a row. `None` writes SQL NULL into an (existing or new) row.
    pub fn insert(&self, key: KeyPath, value: Option<T>) {
        self.rows.write().insert(key, value);
    }

    /// Value at `key`, or `None` if no row exists or the row is NULL.
    pub fn value(&self, key: &KeyPath) -> Option<T> {
        self.rows.read().get(key).cloned().flatten()
    }

    /// Distinguishing read: outer `None` = no row ("never set"),
    /// `Some(None)` = NULL row ("explicitly nil"), `Some(Some(v))` = value.
    pub fn optional_value(&self, key: &KeyPath) -> Option<Option<T>> {
        self.rows.read().get(key).cloned()
    }

    /// Row count (diagnostic).
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}
