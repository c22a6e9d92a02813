//! JSON value codec.
//!
//! Default codec for the encoded-fallback branch. JSON has no way to
//! distinguish `Some(None)` from `None`: both serialize to `null`, so
//! optionals nested deeper than the one structurally-flattened level
//! collapse on the way through. Callers needing that depth plug in
//! [`crate::BincodeCodec`] instead.

use super::traits::{CodecError, ValueCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// JSON codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl ValueCodec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }

    fn codec_id(&self) -> &'static str {
        "json"
    }
}
