//! Core types for propstore
//!
//! This crate defines the foundational types used throughout the system:
//! - KeyId / KeyPath: the composite (model, instance, property) address
//! - Timestamp: microsecond timestamps for history versioning
//! - InstanceStatus: lifecycle status stored in the status index
//! - StorageKind / RawValue: the closed union of physical storage kinds
//! - Error: error type hierarchy
//! - ErrorSink: pluggable absorption strategy for per-operation errors
//! - StoreConfig / CacheConfig: construction-time configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod key;
pub mod sink;
pub mod status;
pub mod timestamp;
pub mod value;

// Re-export commonly used types at the crate root
pub use config::{CacheConfig, StoreConfig};
pub use error::{Error, Result};
pub use key::{KeyId, KeyPath};
pub use sink::{AbsorbedError, ErrorSink, MemorySink, TracingSink};
pub use status::InstanceStatus;
pub use timestamp::Timestamp;
pub use value::{RawValue, StorageKind};
