//! Pluggable error absorption
//!
//! Per-operation failures are caught at the store boundary and converted to
//! "no value" (read) or a dropped write. That absorption is a deliberate
//! contract, so it is routed through an explicit [`ErrorSink`] rather than
//! a hardcoded log call: production stores use [`TracingSink`], tests use
//! [`MemorySink`] and assert on what was absorbed.

use crate::error::Error;
use crate::key::KeyPath;
use parking_lot::Mutex;

/// Strategy for handling absorbed per-operation errors.
///
/// Implementations must be `Send + Sync`; a sink is shared by every store
/// that was constructed with it.
pub trait ErrorSink: Send + Sync {
    /// Record an error absorbed during `op` on `key`.
    fn absorb(&self, op: &'static str, key: &KeyPath, err: &Error);
}

/// Default sink: logs absorbed errors via `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn absorb(&self, op: &'static str, key: &KeyPath, err: &Error) {
        tracing::warn!(target: "propstore::store", op, key = %key, error = %err, "absorbed error");
    }
}

/// One absorbed error, as recorded by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsorbedError {
    /// Operation name at the absorption site
    pub op: &'static str,
    /// Key the operation targeted
    pub key: KeyPath,
    /// Rendered error message
    pub message: String,
}

/// Test sink: collects absorbed errors for assertions.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<AbsorbedError>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of absorbed errors so far.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing has been absorbed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Take all recorded entries, leaving the sink empty.
    pub fn drain(&self) -> Vec<AbsorbedError> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl ErrorSink for MemorySink {
    fn absorb(&self, op: &'static str, key: &KeyPath, err: &Error) {
        self.entries.lock().push(AbsorbedError {
            op,
            key: key.clone(),
            message: err.to_string(),
        });
    }
}
