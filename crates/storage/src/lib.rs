//! Storage layer for propstore
//!
//! This crate implements the typed table layer and the type-dispatch codec:
//! - ColumnTable<T>: single-value-per-key table, one per physical kind
//! - HistoryTable<T>: (key, timestamp)-keyed table with as-of resolution
//! - InstanceStatusIndex: latest status per (model, instance)
//! - Property: the closed conversion surface deciding which table a value
//!   reaches and how one level of optionality flattens to NULL
//! - codec: the pluggable byte codec seam (JSON and bincode shipped)
//!
//! The durable relational engine is an external collaborator; these tables
//! realize its interface boundary in memory with `parking_lot::RwLock`
//! around ordered maps.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod history;
pub mod property;
pub mod status_index;
pub mod table;

pub use codec::{BincodeCodec, CodecError, JsonCodec, ValueCodec};
pub use history::HistoryTable;
pub use property::{Encoded, Property, Slot};
pub use status_index::InstanceStatusIndex;
pub use table::ColumnTable;
