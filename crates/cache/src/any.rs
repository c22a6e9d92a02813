//! Type-erased cache variant.
//!
//! Stores untyped values directly and performs a checked downcast on read.
//! A failed downcast (the slot was repopulated with a different type) is
//! treated as a miss, never an error.

use crate::lru::LruCache;
use std::any::Any;
use std::hash::Hash;
use std::sync::Arc;

/// Bounded cache of `Arc<dyn Any>` values with checked downcast on read.
///
/// Used for the byte-encoded fallback kind, where the decoded value type is
/// only known at the call site.
#[derive(Debug)]
pub struct AnyCache<K> {
    inner: LruCache<K, Arc<dyn Any + Send + Sync>>,
}

impl<K: Eq + Hash> AnyCache<K> {
    /// Create a cache with the given capacity and eviction fraction.
    pub fn new(capacity: usize, eviction_fraction: f64) -> Self {
        Self {
            inner: LruCache::new(capacity, eviction_fraction),
        }
    }

    /// Insert or replace a value.
    pub fn set<V: Any + Send + Sync>(&self, key: K, value: V) {
        self.inner.set(key, Arc::new(value));
    }

    /// Look up and downcast; a type mismatch is a miss.
    pub fn get<V: Any + Send + Sync>(&self, key: &K) -> Option<Arc<V>> {
        self.inner.get(key).and_then(|any| any.downcast::<V>().ok())
    }

    /// Clear everything.
    pub fn remove_all(&self) {
        self.inner.remove_all();
    }

    /// Current entry count.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
