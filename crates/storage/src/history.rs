//! Time-versioned typed column tables.
//!
//! Logical schema: `(model, instance, property, timestamp) -> value NULL`,
//! primary key on (KeyPath, Timestamp). Multiple rows per key are retained
//! (append-only versioning), except that a write to an exact (key,
//! timestamp) pair replaces that row in place, so repeated writes at the
//! same logical tick stay idempotent instead of duplicating history.
//!
//! As-of resolution walks the ordered map: the answer for `as_of(key, at)`
//! is the greatest (key, ts <= at) row.

use parking_lot::RwLock;
use propstore_core::{KeyPath, Timestamp};
use std::collections::BTreeMap;

/// Timestamp-versioned table specialized to one physical value kind.
#[derive(Debug, Default)]
pub struct HistoryTable<T> {
    rows: RwLock<BTreeMap<(KeyPath, Timestamp), Option<T>>>,
}

impl<T: Clone> HistoryTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Append a row, or replace in place if (key, ts) already exists.
    pub fn insert(&self, key: KeyPath, ts: Timestamp, value: Option<T>) {
        self.rows.write().insert((key, ts), value);
    }

    /// Most recent row for `key`, with its timestamp.
    pub fn latest(&self, key: &KeyPath) -> Option<(Option<T>, Timestamp)> {
        self.as_of(key, Timestamp::MAX)
    }

    /// Most recent row with `row.ts <= at`, with its timestamp.
    pub fn as_of(&self, key: &KeyPath, at: Timestamp) -> Option<(Option<T>, Timestamp)> {
        let rows = self.rows.read();
        rows.range((key.clone(), Timestamp::EPOCH)..=(key.clone(), at))
            .next_back()
            .map(|((_, ts), value)| (value.clone(), *ts))
    }

    /// Total row count across all keys (diagnostic).
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Number of retained versions for one key (diagnostic).
    pub fn rows_for(&self, key: &KeyPath) -> usize {
        let rows = self.rows.read();
        rows.range((key.clone(), Timestamp::EPOCH)..=(key.clone(), Timestamp::MAX))
            .count()
    }
}
