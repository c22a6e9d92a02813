//! Time-versioned property store.
//!
//! Every write carries a timestamp (defaulting to now); every read can ask
//! for the latest value or the value as of a given time. A key's history
//! only grows: there is no transition back to "unset".
//!
//! ## Timestamp rules
//!
//! - A write at an exact existing (key, timestamp) replaces that row in
//!   place, keeping repeated writes at one logical tick idempotent.
//! - Status writes to the existence slot maintain the status index under
//!   the monotonic rule: an out-of-order write lands in the history table
//!   but never regresses the index.

use propstore_core::{
    Error, ErrorSink, InstanceStatus, KeyId, KeyPath, RawValue, Result, StorageKind, Timestamp,
    TracingSink,
};
use propstore_storage::{HistoryTable, InstanceStatusIndex, Property, ValueCodec};
use std::sync::Arc;
use tracing::debug;

use crate::store::RowCounts;

/// Timestamp-versioned property store with as-of reads.
pub struct HistoryPropertyStore<C: ValueCodec> {
    ints: HistoryTable<i64>,
    doubles: HistoryTable<f64>,
    texts: HistoryTable<String>,
    blobs: HistoryTable<Vec<u8>>,
    status_index: InstanceStatusIndex,
    codec: C,
    sink: Arc<dyn ErrorSink>,
}

impl<C: ValueCodec> HistoryPropertyStore<C> {
    /// Create a store with the default [`TracingSink`].
    pub fn new(codec: C) -> Self {
        Self::with_sink(codec, Arc::new(TracingSink))
    }

    /// Create a store with an explicit error sink.
    pub fn with_sink(codec: C, sink: Arc<dyn ErrorSink>) -> Self {
        Self {
            ints: HistoryTable::new(),
            doubles: HistoryTable::new(),
            texts: HistoryTable::new(),
            blobs: HistoryTable::new(),
            status_index: InstanceStatusIndex::new(),
            codec,
            sink,
        }
    }

    /// The pluggable byte codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Store a value at `key` timestamped now.
    pub fn set<P: Property>(&self, value: P, key: KeyPath) {
        self.set_at(value, key, Timestamp::now());
    }

    /// Store a value at `key` with an explicit timestamp.
    pub fn set_at<P: Property>(&self, value: P, key: KeyPath, at: Timestamp) {
        if let Some(slot) = self.prepare_at(value, &key, at) {
            if let Err(e) = self.write_row(P::KIND, &key, at, slot) {
                self.sink.absorb("set", &key, &e);
            }
        }
    }

    /// Latest value at `key`.
    pub fn get<P: Property>(&self, key: &KeyPath) -> Option<P> {
        self.get_at(key, None).map(|(value, _)| value)
    }

    /// Value as of `at` (or latest when `at` is `None`), with the
    /// timestamp of the row that answered.
    pub fn get_at<P: Property>(
        &self,
        key: &KeyPath,
        at: Option<Timestamp>,
    ) -> Option<(P, Timestamp)> {
        let row = self.read_row(P::KIND, key, at.unwrap_or(Timestamp::MAX));
        match row {
            None => None,
            Some((slot, ts)) => match P::from_column(Some(slot), &self.codec) {
                Ok(Some(value)) => Some((value, ts)),
                Ok(None) => None,
                Err(e) => {
                    self.sink.absorb("get", key, &e);
                    None
                }
            },
        }
    }

    /// Latest status for one instance, from the status index.
    pub fn status(
        &self,
        model: &KeyId,
        instance: &KeyId,
    ) -> Option<(InstanceStatus, Timestamp)> {
        self.status_index.value(model, instance)
    }

    /// Enumerate instances of a model via the status index.
    pub fn instances<T>(
        &self,
        model: &KeyId,
        predicate: impl Fn(&KeyId, InstanceStatus) -> Option<T>,
    ) -> Vec<T> {
        self.status_index.all(model, predicate)
    }

    /// Row counts across all tables (history tables count every retained
    /// version).
    pub fn row_counts(&self) -> RowCounts {
        RowCounts {
            int: self.ints.len(),
            double: self.doubles.len(),
            text: self.texts.len(),
            blob: self.blobs.len(),
            status: self.status_index.len(),
        }
    }

    /// Number of retained versions for one key in the table for `kind`.
    pub fn versions(&self, kind: StorageKind, key: &KeyPath) -> usize {
        match kind {
            StorageKind::Int => self.ints.rows_for(key),
            StorageKind::Double => self.doubles.rows_for(key),
            StorageKind::Text => self.texts.rows_for(key),
            StorageKind::Blob => self.blobs.rows_for(key),
        }
    }

    /// Convert a value to its column slot and maintain the status index
    /// under the monotonic rule.
    pub(crate) fn prepare_at<P: Property>(
        &self,
        value: P,
        key: &KeyPath,
        at: Timestamp,
    ) -> Option<Option<RawValue>> {
        let status = value.as_status();
        let slot = match value.to_column(&self.codec) {
            Ok(slot) => slot,
            Err(e) => {
                self.sink.absorb("set", key, &e);
                return None;
            }
        };
        if let Some(status) = status {
            if key.is_existence_slot() {
                let applied = self.status_index.update_monotonic(
                    key.model().clone(),
                    key.instance().clone(),
                    status,
                    at,
                );
                if !applied {
                    debug!(target: "propstore::store", key = %key, at = at.as_micros(), "stale status timestamp, index unchanged");
                }
            }
        }
        Some(slot)
    }

    /// Write a prepared slot into the history table for `kind`.
    pub(crate) fn write_row(
        &self,
        kind: StorageKind,
        key: &KeyPath,
        at: Timestamp,
        slot: Option<RawValue>,
    ) -> Result<()> {
        match kind {
            StorageKind::Int => {
                let value = slot.map(RawValue::into_int).transpose()?;
                self.ints.insert(key.clone(), at, value);
            }
            StorageKind::Double => {
                let value = slot.map(RawValue::into_double).transpose()?;
                self.doubles.insert(key.clone(), at, value);
            }
            StorageKind::Text => {
                let value = slot.map(RawValue::into_text).transpose()?;
                self.texts.insert(key.clone(), at, value);
            }
            StorageKind::Blob => {
                let value = slot.map(RawValue::into_blob).transpose()?;
                self.blobs.insert(key.clone(), at, value);
            }
        }
        Ok(())
    }

    /// Most recent row with ts <= `at`, as a raw slot.
    pub(crate) fn read_row(
        &self,
        kind: StorageKind,
        key: &KeyPath,
        at: Timestamp,
    ) -> Option<(Option<RawValue>, Timestamp)> {
        match kind {
            StorageKind::Int => self
                .ints
                .as_of(key, at)
                .map(|(v, ts)| (v.map(RawValue::Int), ts)),
            StorageKind::Double => self
                .doubles
                .as_of(key, at)
                .map(|(v, ts)| (v.map(RawValue::Double), ts)),
            StorageKind::Text => self
                .texts
                .as_of(key, at)
                .map(|(v, ts)| (v.map(RawValue::Text), ts)),
            StorageKind::Blob => self
                .blobs
                .as_of(key, at)
                .map(|(v, ts)| (v.map(RawValue::Blob), ts)),
        }
    }

    /// Timestamp of the newest row for `key`, if any.
    pub(crate) fn latest_ts(&self, kind: StorageKind, key: &KeyPath) -> Option<Timestamp> {
        self.read_row(kind, key, Timestamp::MAX).map(|(_, ts)| ts)
    }

    pub(crate) fn absorb(&self, op: &'static str, key: &KeyPath, err: &Error) {
        self.sink.absorb(op, key, err);
    }
}
