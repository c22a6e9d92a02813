//! Bounded LRU cache with batch eviction.
//!
//! Eviction removes a batch — `floor(capacity * eviction_fraction)` of the
//! coldest entries by access stamp — rather than a single item, amortizing
//! eviction cost across many inserts. After an eviction pass the cache
//! holds `capacity - floor(capacity * eviction_fraction)` entries.
//!
//! Recency is tracked with a monotonic logical clock bumped on every set
//! and every hit; a read counts as use. Stamps are unique, so the cold
//! cutoff is exact.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::hash::Hash;

#[derive(Debug)]
struct Entry<V> {
    value: V,
    stamp: u64,
}

#[derive(Debug)]
struct Inner<K, V> {
    map: FxHashMap<K, Entry<V>>,
    clock: u64,
}

/// Bounded mapping from key to value with least-recently-used batch
/// eviction.
///
/// Interior mutability under a single `parking_lot::Mutex`: stamp updates
/// and eviction are applied in one mutual-exclusion section, so the cache
/// is safe to share across threads behind an `Arc` or by reference.
#[derive(Debug)]
pub struct LruCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    capacity: usize,
    eviction_fraction: f64,
}

impl<K: Eq + Hash, V: Clone> LruCache<K, V> {
    /// Create a cache with the given capacity and eviction fraction.
    ///
    /// `eviction_fraction` is clamped to (0, 1); the eviction batch is
    /// always at least one entry so a full cache can make progress.
    pub fn new(capacity: usize, eviction_fraction: f64) -> Self {
        Self {
            inner: Mutex::new(Inner {
                map: FxHashMap::default(),
                clock: 0,
            }),
            capacity: capacity.max(1),
            eviction_fraction: eviction_fraction.clamp(0.0, 1.0),
        }
    }

    /// Insert or replace a value, evicting a cold batch first when the
    /// cache is at capacity.
    ///
    /// Replacing an existing key never evicts: the cache does not grow.
    pub fn set(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        if !inner.map.contains_key(&key) && inner.map.len() >= self.capacity {
            self.evict_batch(&mut inner);
        }
        inner.clock += 1;
        let stamp = inner.clock;
        inner.map.insert(key, Entry { value, stamp });
    }

    /// Look up a value; a hit refreshes the access stamp.
    ///
    /// A miss returns `None` and caches nothing (no negative caching).
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.lock();
        inner.clock += 1;
        let stamp = inner.clock;
        let entry = inner.map.get_mut(key)?;
        entry.stamp = stamp;
        Some(entry.value.clone())
    }

    /// Clear everything (memory-pressure hook).
    pub fn remove_all(&self) {
        self.inner.lock().map.clear();
    }

    /// Current entry count.
    pub fn len(&self) -> usize {
        self.inner.lock().map.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().map.is_empty()
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Configured eviction fraction.
    pub fn eviction_fraction(&self) -> f64 {
        self.eviction_fraction
    }

    /// Remove the coldest `floor(capacity * eviction_fraction)` entries,
    /// minimum one.
    fn evict_batch(&self, inner: &mut Inner<K, V>) {
        let batch = ((self.capacity as f64 * self.eviction_fraction) as usize).max(1);
        if batch >= inner.map.len() {
            inner.map.clear();
            return;
        }

        // Stamps are unique, so the batch-th smallest stamp is an exact
        // cutoff: everything at or below it goes.
        let mut stamps: Vec<u64> = inner.map.values().map(|e| e.stamp).collect();
        stamps.sort_unstable();
        let cutoff = stamps[batch - 1];
        inner.map.retain(|_, entry| entry.stamp > cutoff);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_round_trip() {
        let cache = LruCache::new(4, 0.25);
        cache.set("a", 1);
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.get(&"b"), None);
    }

    #[test]
    fn test_replace_does_not_evict() {
        let cache = LruCache::new(2, 0.5);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("a", 10);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a"), Some(10));
        assert_eq!(cache.get(&"b"), Some(2));
    }

    #[test]
    fn test_batch_eviction_count() {
        // capacity=1000, fraction=0.5: 1000 inserts fit, the 1001st
        // triggers a 500-entry eviction and lands at 501.
        let cache = LruCache::new(1000, 0.5);
        for i in 0..1000u32 {
            cache.set(i, i);
        }
        assert_eq!(cache.len(), 1000);

        cache.set(1000, 1000);
        assert_eq!(cache.len(), 501);
    }

    #[test]
    fn test_eviction_removes_coldest() {
        let cache = LruCache::new(4, 0.5);
        for i in 0..4u32 {
            cache.set(i, i);
        }
        // Touch 0 and 1 so 2 and 3 are coldest
        cache.get(&0);
        cache.get(&1);

        cache.set(4, 4);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&0), Some(0));
        assert_eq!(cache.get(&1), Some(1));
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&3), None);
        assert_eq!(cache.get(&4), Some(4));
    }

    #[test]
    fn test_read_counts_as_use() {
        let cache = LruCache::new(2, 0.5);
        cache.set("old", 1);
        cache.set("new", 2);
        // Refresh "old"; "new" becomes the eviction candidate
        cache.get(&"old");

        cache.set("newest", 3);
        assert_eq!(cache.get(&"old"), Some(1));
        assert_eq!(cache.get(&"new"), None);
    }

    #[test]
    fn test_remove_all() {
        let cache = LruCache::new(8, 0.25);
        for i in 0..5u32 {
            cache.set(i, i);
        }
        cache.remove_all();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&0), None);
    }

    #[test]
    fn test_tiny_capacity_still_makes_progress() {
        let cache = LruCache::new(1, 0.2);
        cache.set("a", 1);
        cache.set("b", 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"b"), Some(2));
    }

    #[test]
    fn test_concurrent_access() {
        use std::sync::Arc;
        use std::thread;

        let cache = Arc::new(LruCache::new(128, 0.25));
        let mut handles = Vec::new();
        for t in 0..4u64 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..1000u64 {
                    cache.set(t * 1000 + i, i);
                    cache.get(&(t * 1000 + i));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(cache.len() <= 128);
    }
}
