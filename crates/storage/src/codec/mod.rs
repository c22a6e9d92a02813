//! Pluggable value codec seam.
//!
//! The encoded-fallback dispatch branch stores arbitrary serde values as
//! bytes in the blob column. The codec doing that byte conversion is a
//! capability plugged into the store at construction, not something the
//! store implements: swapping it changes what survives a round trip.
//!
//! Two codecs ship here:
//!
//! - [`JsonCodec`]: human-readable, collapses nested optionals — a value of
//!   shape `Some(None)` encodes to `null` and decodes as `None`. This is a
//!   documented boundary condition, not corrected by the store.
//! - [`BincodeCodec`]: compact binary, preserves optional nesting.

mod bincode_codec;
mod json;
mod traits;

pub use bincode_codec::BincodeCodec;
pub use json::JsonCodec;
pub use traits::{CodecError, ValueCodec};
