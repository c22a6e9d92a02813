//! Property store engine
//!
//! Composes the typed tables, the status index, the type-dispatch codec
//! and the caching layer into the public get/set/query surface:
//!
//! - [`PropertyStore`]: point-in-time store, one row per key
//! - [`HistoryPropertyStore`]: timestamped variant with as-of reads
//! - [`CachingPropertyStore`] / [`CachingHistoryStore`]: write-through,
//!   read-populate cache fronts
//!
//! # Quick Start
//!
//! ```
//! use propstore_engine::{JsonCodec, KeyPath, PropertyStore};
//!
//! let store = PropertyStore::new(JsonCodec);
//! store.set(42i64, KeyPath::new(1, 1, "cpu_count"));
//! assert_eq!(store.get::<i64>(&KeyPath::new(1, 1, "cpu_count")), Some(42));
//! ```
//!
//! # Error policy
//!
//! Per-operation failures (conversion overflow, codec errors) are absorbed
//! at this boundary: reads report `None`, writes are dropped, and each
//! absorbed error goes through the store's [`ErrorSink`]. A failed read is
//! indistinguishable from "never set" — callers are expected to tolerate
//! `None` for both reasons.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cached;
pub mod history_store;
pub mod store;

pub use cached::{CachingHistoryStore, CachingPropertyStore};
pub use history_store::HistoryPropertyStore;
pub use store::{PropertyStore, RowCounts};

// Re-export the types callers need to drive the stores
pub use propstore_cache::{AnyCache, KindPartitionedCache, LruCache};
pub use propstore_core::{
    AbsorbedError, CacheConfig, Error, ErrorSink, InstanceStatus, KeyId, KeyPath, MemorySink,
    RawValue, Result, StorageKind, StoreConfig, Timestamp, TracingSink,
};
pub use propstore_storage::{
    BincodeCodec, CodecError, Encoded, JsonCodec, Property, ValueCodec,
};
