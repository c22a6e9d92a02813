//! Point-in-time property store.
//!
//! Composes the four typed column tables, the instance status index and
//! the type-dispatch codec into the public get/set/query surface. All
//! per-operation errors are absorbed here through the configured
//! [`ErrorSink`]; only construction can fail loudly, and in-memory
//! construction cannot fail at all.

use propstore_core::{
    Error, ErrorSink, InstanceStatus, KeyId, KeyPath, RawValue, Result, StorageKind, Timestamp,
    TracingSink,
};
use propstore_storage::{ColumnTable, InstanceStatusIndex, Property, ValueCodec};
use std::sync::Arc;
use tracing::debug;

/// Row counts per table, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowCounts {
    /// Integer column store rows
    pub int: usize,
    /// Double column store rows
    pub double: usize,
    /// Text column store rows
    pub text: usize,
    /// Blob column store rows
    pub blob: usize,
    /// Status index rows
    pub status: usize,
}

/// Point-in-time property store: one row per key, replaced in place.
///
/// Generic over the pluggable byte codec used by the encoded-fallback
/// branch. The store owns its tables and its error sink; there is no
/// hidden global state.
pub struct PropertyStore<C: ValueCodec> {
    ints: ColumnTable<i64>,
    doubles: ColumnTable<f64>,
    texts: ColumnTable<String>,
    blobs: ColumnTable<Vec<u8>>,
    status_index: InstanceStatusIndex,
    codec: C,
    sink: Arc<dyn ErrorSink>,
}

impl<C: ValueCodec> PropertyStore<C> {
    /// Create a store with the default [`TracingSink`].
    pub fn new(codec: C) -> Self {
        Self::with_sink(codec, Arc::new(TracingSink))
    }

    /// Create a store with an explicit error sink.
    pub fn with_sink(codec: C, sink: Arc<dyn ErrorSink>) -> Self {
        Self {
            ints: ColumnTable::new(),
            doubles: ColumnTable::new(),
            texts: ColumnTable::new(),
            blobs: ColumnTable::new(),
            status_index: InstanceStatusIndex::new(),
            codec,
            sink,
        }
    }

    /// The pluggable byte codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Store a value at `key`.
    ///
    /// Conversion or codec failures are absorbed: the write is dropped and
    /// the error goes to the sink.
    pub fn set<P: Property>(&self, value: P, key: KeyPath) {
        if let Some(slot) = self.prepare(value, &key) {
            if let Err(e) = self.write_slot(P::KIND, &key, slot) {
                self.sink.absorb("set", &key, &e);
            }
        }
    }

    /// Read a value at `key`.
    ///
    /// Returns `None` for "never set", "explicitly nil read as non-optional",
    /// and absorbed errors alike; read `Option<T>` to distinguish the first
    /// two.
    pub fn get<P: Property>(&self, key: &KeyPath) -> Option<P> {
        let slot = self.slot(P::KIND, key);
        match P::from_column(slot, &self.codec) {
            Ok(value) => value,
            Err(e) => {
                self.sink.absorb("get", key, &e);
                None
            }
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

    /// Enumerate instances of a model, collecting non-nil predicate
    /// results from the status index.
    pub fn instances<T>(
        &self,
        model: &KeyId,
        predicate: impl Fn(&KeyId, InstanceStatus) -> Option<T>,
    ) -> Vec<T> {
        self.status_index.all(model, predicate)
    }

    /// Row counts across all tables.
    pub fn row_counts(&self) -> RowCounts {
        RowCounts {
            int: self.ints.len(),
            double: self.doubles.len(),
            text: self.texts.len(),
            blob: self.blobs.len(),
            status: self.status_index.len(),
        }
    }

    /// Raw read slot for `kind` at `key`: outer `None` = no row,
    /// `Some(None)` = NULL row. Used by the caching layer.
    pub fn slot(&self, kind: StorageKind, key: &KeyPath) -> Option<Option<RawValue>> {
        match kind {
            StorageKind::Int => self
                .ints
                .optional_value(key)
                .map(|v| v.map(RawValue::Int)),
            StorageKind::Double => self
                .doubles
                .optional_value(key)
                .map(|v| v.map(RawValue::Double)),
            StorageKind::Text => self
                .texts
                .optional_value(key)
                .map(|v| v.map(RawValue::Text)),
            StorageKind::Blob => self
                .blobs
                .optional_value(key)
                .map(|v| v.map(RawValue::Blob)),
        }
    }

    /// Convert a value to its column slot and maintain the status index.
    ///
    /// Returns `None` (with the error absorbed) if conversion failed.
    pub(crate) fn prepare<P: Property>(
        &self,
        value: P,
        key: &KeyPath,
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
                self.status_index.update(
                    key.model().clone(),
                    key.instance().clone(),
                    status,
                    Timestamp::now(),
                );
                debug!(target: "propstore::store", key = %key, status = ?status, "status index updated");
            }
        }
        Some(slot)
    }

    /// Write a prepared slot into the table for `kind`.
    pub(crate) fn write_slot(
        &self,
        kind: StorageKind,
        key: &KeyPath,
        slot: Option<RawValue>,
    ) -> Result<()> {
        match kind {
            StorageKind::Int => {
                let value = slot.map(RawValue::into_int).transpose()?;
                self.ints.insert(key.clone(), value);
            }
            StorageKind::Double => {
                let value = slot.map(RawValue::into_double).transpose()?;
                self.doubles.insert(key.clone(), value);
            }
            StorageKind::Text => {
                let value = slot.map(RawValue::into_text).transpose()?;
                self.texts.insert(key.clone(), value);
            }
            StorageKind::Blob => {
                let value = slot.map(RawValue::into_blob).transpose()?;
                self.blobs.insert(key.clone(), value);
            }
        }
        Ok(())
    }

    pub(crate) fn absorb(&self, op: &'static str, key: &KeyPath, err: &Error) {
        self.sink.absorb(op, key, err);
    }
}
