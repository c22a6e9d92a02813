//! Kind-partitioned cache.
//!
//! One independent LRU per storage kind plus a type-erased partition for
//! decoded fallback values. Capacities are per kind, so a burst of blob
//! traffic cannot evict cached integers.
//!
//! Partition values are read slots (`Option<RawValue>`): a cached `None`
//! means "row present with NULL", which keeps "explicitly nil" cacheable.
//! "No row" is never cached — that stays a miss and re-queries the store.

use crate::any::AnyCache;
use crate::lru::LruCache;
use propstore_core::{CacheConfig, RawValue, StorageKind};
use std::hash::Hash;

/// Per-kind cache of column slots, fronted by one LRU per storage kind.
#[derive(Debug)]
pub struct KindPartitionedCache<K> {
    int: LruCache<K, Option<RawValue>>,
    double: LruCache<K, Option<RawValue>>,
    text: LruCache<K, Option<RawValue>>,
    blob: LruCache<K, Option<RawValue>>,
    any: AnyCache<K>,
}

impl<K: Eq + Hash> KindPartitionedCache<K> {
    /// Build the partitions from a [`CacheConfig`].
    pub fn new(config: &CacheConfig) -> Self {
        let f = config.eviction_fraction;
        Self {
            int: LruCache::new(config.int_capacity, f),
            double: LruCache::new(config.double_capacity, f),
            text: LruCache::new(config.text_capacity, f),
            blob: LruCache::new(config.blob_capacity, f),
            any: AnyCache::new(config.any_capacity, f),
        }
    }

    fn partition(&self, kind: StorageKind) -> &LruCache<K, Option<RawValue>> {
        match kind {
            StorageKind::Int => &self.int,
            StorageKind::Double => &self.double,
            StorageKind::Text => &self.text,
            StorageKind::Blob => &self.blob,
        }
    }

    /// Cache a column slot for `key` in the partition for `kind`.
    pub fn set_slot(&self, kind: StorageKind, key: K, slot: Option<RawValue>) {
        self.partition(kind).set(key, slot);
    }

    /// Cached column slot, if any. `Some(None)` is a cached NULL row.
    pub fn get_slot(&self, kind: StorageKind, key: &K) -> Option<Option<RawValue>> {
        self.partition(kind).get(key)
    }

    /// The type-erased partition for decoded fallback values.
    pub fn any(&self) -> &AnyCache<K> {
        &self.any
    }

    /// Clear every partition (memory-pressure hook).
    pub fn remove_all(&self) {
        self.int.remove_all();
        self.double.remove_all();
        self.text.remove_all();
        self.blob.remove_all();
        self.any.remove_all();
    }

    /// Entry count of one partition (diagnostic).
    pub fn len(&self, kind: StorageKind) -> usize {
        self.partition(kind).len()
    }
}
