//! Value codec trait definitions.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Byte codec for the encoded-fallback storage branch.
///
/// All values taking the fallback path go through the codec. Encode and
/// decode are typed, so the trait is consumed through a generic parameter
/// on the stores rather than through a trait object.
///
/// # Thread Safety
///
/// Codecs must be `Send + Sync`; one codec instance serves every thread
/// using the store it was plugged into.
pub trait ValueCodec: Send + Sync {
    /// Encode a value to bytes for the blob column.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Decode bytes from the blob column back into the requested shape.
    ///
    /// Fails on malformed bytes or a shape mismatch.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;

    /// Unique codec identifier, for diagnostics.
    fn codec_id(&self) -> &'static str;
}

/// Codec errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Encoding failed (unsupported shape for this codec).
    #[error("Encode error: {0}")]
    Encode(String),

    /// Decoding failed (malformed bytes or shape mismatch).
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<CodecError> for propstore_core::Error {
    fn from(err: CodecError) -> Self {
        propstore_core::Error::Codec(err.to_string())
    }
}
