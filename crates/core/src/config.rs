//! Construction-time configuration
//!
//! Plain structs with defaults. There is no ambient global configuration:
//! every store and cache receives its config (and its cache handle) at
//! construction.

/// Configuration for the kind-partitioned caching layer.
///
/// Each storage kind gets an independent capacity so a burst of one kind
/// cannot evict cached values of another. Eviction removes a batch — a
/// fraction of the coldest entries — rather than a single item.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Capacity of the integer partition
    pub int_capacity: usize,
    /// Capacity of the double partition
    pub double_capacity: usize,
    /// Capacity of the text partition
    pub text_capacity: usize,
    /// Capacity of the blob partition
    pub blob_capacity: usize,
    /// Capacity of the type-erased partition (encoded fallback values)
    pub any_capacity: usize,
    /// Fraction of capacity evicted per batch, in (0, 1)
    pub eviction_fraction: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            int_capacity: 1024,
            double_capacity: 1024,
            text_capacity: 1024,
            blob_capacity: 256,
            any_capacity: 256,
            eviction_fraction: 0.2,
        }
    }
}

impl CacheConfig {
    /// Uniform capacity across all partitions.
    pub fn with_capacity(capacity: usize) -> Self {
        CacheConfig {
            int_capacity: capacity,
            double_capacity: capacity,
            text_capacity: capacity,
            blob_capacity: capacity,
            any_capacity: capacity,
            ..Default::default()
        }
    }

    /// Small capacities for tests that exercise eviction.
    pub fn with_small_capacities() -> Self {
        Self::with_capacity(8)
    }

    /// Override the eviction fraction.
    pub fn eviction_fraction(mut self, fraction: f64) -> Self {
        self.eviction_fraction = fraction;
        self
    }
}

/// Top-level store configuration.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Caching layer configuration
    pub cache: CacheConfig,
}
