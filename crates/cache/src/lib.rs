//! Bounded in-memory caches for propstore
//!
//! - LruCache: generic bounded map with batch LRU eviction
//! - AnyCache: type-erased variant with checked downcast on read
//! - KindPartitionedCache: one cache per storage kind so a burst of one
//!   kind cannot evict unrelated cached kinds
//!
//! All caches are safe under concurrent access: eviction and access-stamp
//! updates happen under one mutex per cache instance. There is no
//! background eviction thread; eviction only runs synchronously inside
//! `set` when capacity is exceeded.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod any;
pub mod lru;
pub mod partitioned;

pub use any::AnyCache;
pub use lru::LruCache;
pub use partitioned::KindPartitionedCache;
