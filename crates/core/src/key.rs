//! Composite property keys
//!
//! Every stored value is addressed by a [`KeyPath`]: a (model, instance,
//! property) triple. Each component is a [`KeyId`], a closed scalar that is
//! either an integer or a string. KeyPaths are totally ordered and hashable
//! so they can serve as map keys in every table and cache.
//!
//! ## Contract
//!
//! - A KeyPath uniquely identifies one logical property slot.
//! - KeyPaths are immutable once constructed.
//! - Ordering is lexicographic over (model, instance, property), with all
//!   integer ids ordering before all string ids within a component.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One component of a composite key: an integer or string scalar.
///
/// Integer ids order before string ids; within a variant the natural
/// ordering of the scalar applies. This is derived from variant order and
/// must not be rearranged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KeyId {
    /// Integer identifier (e.g. a rowid from the model layer)
    Int(i64),
    /// String identifier (e.g. a named property)
    Text(String),
}

impl KeyId {
    /// Smallest possible KeyId, used as a scan lower bound.
    pub const MIN: KeyId = KeyId::Int(i64::MIN);
}

impl From<i64> for KeyId {
    fn from(id: i64) -> Self {
        KeyId::Int(id)
    }
}

impl From<i32> for KeyId {
    fn from(id: i32) -> Self {
        KeyId::Int(id as i64)
    }
}

impl From<&str> for KeyId {
    fn from(id: &str) -> Self {
        KeyId::Text(id.to_string())
    }
}

impl From<String> for KeyId {
    fn from(id: String) -> Self {
        KeyId::Text(id)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyId::Int(i) => write!(f, "{i}"),
            KeyId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Composite (model, instance, property) address of a stored property.
///
/// # Example
///
/// ```
/// use propstore_core::KeyPath;
///
/// let key = KeyPath::new(1, 42, "display_name");
/// assert_eq!(key.to_string(), "1/42/display_name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyPath {
    model: KeyId,
    instance: KeyId,
    property: KeyId,
}

impl KeyPath {
    /// Reserved property id marking "this instance exists".
    ///
    /// Status values written to this slot additionally maintain the
    /// instance status index; status values written anywhere else only hit
    /// the integer column store.
    pub const EXISTENCE_PROPERTY: KeyId = KeyId::Int(0);

    /// Create a new key path.
    pub fn new(
        model: impl Into<KeyId>,
        instance: impl Into<KeyId>,
        property: impl Into<KeyId>,
    ) -> Self {
        Self {
            model: model.into(),
            instance: instance.into(),
            property: property.into(),
        }
    }

    /// Create the existence slot for a (model, instance) pair.
    pub fn existence(model: impl Into<KeyId>, instance: impl Into<KeyId>) -> Self {
        Self::new(model, instance, Self::EXISTENCE_PROPERTY)
    }

    /// Model id component.
    pub fn model(&self) -> &KeyId {
        &self.model
    }

    /// Instance id component.
    pub fn instance(&self) -> &KeyId {
        &self.instance
    }

    /// Property id component.
    pub fn property(&self) -> &KeyId {
        &self.property
    }

    /// Whether this key addresses the reserved existence slot.
    pub fn is_existence_slot(&self) -> bool {
        self.property == Self::EXISTENCE_PROPERTY
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.model, self.instance, self.property)
    }
}
