//! propstore - typed, time-versioned property store
//!
//! A property store persisting values addressed by a (model, instance,
//! property) key into typed column tables, with an optional history mode
//! and a transparent LRU caching layer.
//!
//! # Quick Start
//!
//! ```
//! use propstore::{JsonCodec, KeyPath, PropertyStore};
//!
//! let store = PropertyStore::new(JsonCodec);
//!
//! // Store a value
//! store.set("Alice".to_string(), KeyPath::new(1, 42, "display_name"));
//!
//! // Retrieve it
//! let name = store.get::<String>(&KeyPath::new(1, 42, "display_name"));
//! assert_eq!(name.as_deref(), Some("Alice"));
//! ```
//!
//! # Architecture
//!
//! All operations go through the engine crate, which composes the typed
//! tables, the type-dispatch codec, the status index and the caching
//! layer. Internal table and cache implementation details are available
//! through `propstore-storage` and `propstore-cache` but the engine
//! surface is what callers use.

// Re-export the public API from propstore-engine
pub use propstore_engine::*;
