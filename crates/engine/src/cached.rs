//! Caching fronts for the stores.
//!
//! Write-through, read-populate: every set writes the cache and the store;
//! every get checks the cache first and populates it on a store hit. The
//! cache is advisory — coherence with writes that bypass it is restored by
//! [`CachingPropertyStore::remove_all`] (e.g. on a host memory-pressure
//! signal, which also empties the cache).
//!
//! Cached entries are column slots, so "explicitly nil" (a NULL row) is
//! cacheable; "no row at all" never is — such reads re-query the store
//! every time.

use propstore_cache::KindPartitionedCache;
use propstore_core::{CacheConfig, InstanceStatus, KeyId, KeyPath, StorageKind, Timestamp};
use propstore_storage::{Encoded, Property, ValueCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::history_store::HistoryPropertyStore;
use crate::store::{PropertyStore, RowCounts};

/// Write-through cache in front of a [`PropertyStore`].
///
/// The cache handle is owned by the store wrapper; there is no shared
/// global cache.
pub struct CachingPropertyStore<C: ValueCodec> {
    store: PropertyStore<C>,
    cache: KindPartitionedCache<KeyPath>,
}

impl<C: ValueCodec> CachingPropertyStore<C> {
    /// Wrap a store with a cache built from `config`.
    pub fn new(store: PropertyStore<C>, config: &CacheConfig) -> Self {
        Self {
            store,
            cache: KindPartitionedCache::new(config),
        }
    }

    /// The wrapped store, for direct (cache-bypassing) access.
    pub fn store(&self) -> &PropertyStore<C> {
        &self.store
    }

    /// Store a value, writing through cache and store.
    pub fn set<P: Property>(&self, value: P, key: KeyPath) {
        if let Some(slot) = self.store.prepare(value, &key) {
            self.cache.set_slot(P::KIND, key.clone(), slot.clone());
            if let Err(e) = self.store.write_slot(P::KIND, &key, slot) {
                self.store.absorb("set", &key, &e);
            }
        }
    }

    /// Read a value, cache first.
    pub fn get<P: Property>(&self, key: &KeyPath) -> Option<P> {
        if let Some(slot) = self.cache.get_slot(P::KIND, key) {
            return self.decode::<P>(Some(slot), key);
        }
        let slot = self.store.slot(P::KIND, key);
        if let Some(row) = &slot {
            self.cache.set_slot(P::KIND, key.clone(), row.clone());
        }
        self.decode::<P>(slot, key)
    }

    /// Store a fallback value, keeping the decoded form in the type-erased
    /// partition so hits skip the byte codec entirely.
    pub fn set_encoded<T>(&self, value: T, key: KeyPath)
    where
        T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    {
        self.cache.any().set(key.clone(), value.clone());
        if let Some(slot) = self.store.prepare(Encoded(value), &key) {
            if let Err(e) = self.store.write_slot(StorageKind::Blob, &key, slot) {
                self.store.absorb("set", &key, &e);
            }
        }
    }

    /// Read a fallback value through the type-erased partition.
    ///
    /// A downcast failure counts as a miss and falls through to the store.
    pub fn get_encoded<T>(&self, key: &KeyPath) -> Option<T>
    where
        T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    {
        if let Some(hit) = self.cache.any().get::<T>(key) {
            return Some((*hit).clone());
        }
        let value = self.store.get::<Encoded<T>>(key)?.into_inner();
        self.cache.any().set(key.clone(), value.clone());
        Some(value)
    }

    /// Latest status for one instance (not cached; index lookups are
    /// already point reads).
    pub fn status(
        &self,
        model: &KeyId,
        instance: &KeyId,
    ) -> Option<(InstanceStatus, Timestamp)> {
        self.store.status(model, instance)
    }

    /// Enumerate instances of a model via the status index.
    pub fn instances<T>(
        &self,
        model: &KeyId,
        predicate: impl Fn(&KeyId, InstanceStatus) -> Option<T>,
    ) -> Vec<T> {
        self.store.instances(model, predicate)
    }

    /// Clear every cache partition (memory-pressure hook).
    pub fn remove_all(&self) {
        self.cache.remove_all();
    }

    /// Entry count of one cache partition (diagnostic).
    pub fn cached(&self, kind: StorageKind) -> usize {
        self.cache.len(kind)
    }

    /// Row counts of the underlying store.
    pub fn row_counts(&self) -> RowCounts {
        self.store.row_counts()
    }

    fn decode<P: Property>(
        &self,
        slot: Option<Option<propstore_core::RawValue>>,
        key: &KeyPath,
    ) -> Option<P> {
        match P::from_column(slot, self.store.codec()) {
            Ok(value) => value,
            Err(e) => {
                self.store.absorb("get", key, &e);
                None
            }
        }
    }
}

/// Write-through cache in front of a [`HistoryPropertyStore`].
///
/// Only latest-value reads (`get`) are cached. `get_at` reports row
/// timestamps, which the cache does not retain, so it always reads the
/// store. A `set_at` carrying a stale timestamp (older than the newest
/// retained row) skips the cache so the cached latest value stays correct.
pub struct CachingHistoryStore<C: ValueCodec> {
    store: HistoryPropertyStore<C>,
    cache: KindPartitionedCache<KeyPath>,
}

impl<C: ValueCodec> CachingHistoryStore<C> {
    /// Wrap a history store with a cache built from `config`.
    pub fn new(store: HistoryPropertyStore<C>, config: &CacheConfig) -> Self {
        Self {
            store,
            cache: KindPartitionedCache::new(config),
        }
    }

    /// The wrapped store, for direct (cache-bypassing) access.
    pub fn store(&self) -> &HistoryPropertyStore<C> {
        &self.store
    }

    /// Store a value timestamped now.
    pub fn set<P: Property>(&self, value: P, key: KeyPath) {
        self.set_at(value, key, Timestamp::now());
    }

    /// Store a value with an explicit timestamp.
    pub fn set_at<P: Property>(&self, value: P, key: KeyPath, at: Timestamp) {
        if let Some(slot) = self.store.prepare_at(value, &key, at) {
            let newest = self.store.latest_ts(P::KIND, &key);
            if newest.map_or(true, |ts| at >= ts) {
                self.cache.set_slot(P::KIND, key.clone(), slot.clone());
            }
            if let Err(e) = self.store.write_row(P::KIND, &key, at, slot) {
                self.store.absorb("set", &key, &e);
            }
        }
    }

    /// Latest value, cache first.
    pub fn get<P: Property>(&self, key: &KeyPath) -> Option<P> {
        if let Some(slot) = self.cache.get_slot(P::KIND, key) {
            match P::from_column(Some(slot), self.store.codec()) {
                Ok(value) => return value,
                Err(e) => {
                    self.store.absorb("get", key, &e);
                    return None;
                }
            }
        }
        let row = self.store.read_row(P::KIND, key, Timestamp::MAX);
        if let Some((slot, _)) = &row {
            self.cache.set_slot(P::KIND, key.clone(), slot.clone());
        }
        match P::from_column(row.map(|(slot, _)| slot), self.store.codec()) {
            Ok(value) => value,
            Err(e) => {
                self.store.absorb("get", key, &e);
                None
            }
        }
    }

    /// Value as of `at` (or latest with its timestamp). Always reads the
    /// store.
    pub fn get_at<P: Property>(
        &self,
        key: &KeyPath,
        at: Option<Timestamp>,
    ) -> Option<(P, Timestamp)> {
        self.store.get_at(key, at)
    }

    /// Clear every cache partition.
    pub fn remove_all(&self) {
        self.cache.remove_all();
    }

    /// Entry count of one cache partition (diagnostic).
    pub fn cached(&self, kind: StorageKind) -> usize {
        self.cache.len(kind)
    }
}
