//! Bincode value codec.
//!
//! Compact binary alternative to [`crate::JsonCodec`]. Bincode tags each
//! optional layer, so nested optionals survive a round trip through the
//! fallback branch.

use super::traits::{CodecError, ValueCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Binary codec backed by `bincode`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl ValueCodec for BincodeCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        bincode::serialize(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        bincode::deserialize(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }

    fn codec_id(&self) -> &'static str {
        "bincode"
    }
}
