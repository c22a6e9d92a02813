//! Instance lifecycle status
//!
//! Status values are stored in the integer column store like any other
//! integer property, and additionally mirrored into the instance status
//! index when written to the reserved existence slot.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a model instance.
///
/// The wire form is a small integer; decoding an unknown code is an error
/// rather than a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i64)]
pub enum InstanceStatus {
    /// Instance row exists but has not finished provisioning
    Provisioning = 0,
    /// Instance is live
    Active = 1,
    /// Instance is temporarily suspended
    Suspended = 2,
    /// Instance has been retired; kept for history queries
    Retired = 3,
}

impl InstanceStatus {
    /// Integer wire form, as stored in the integer column store.
    #[inline]
    pub const fn as_i64(self) -> i64 {
        self as i64
    }

    /// Decode from the integer wire form.
    pub fn from_i64(code: i64) -> Result<Self, Error> {
        match code {
            0 => Ok(InstanceStatus::Provisioning),
            1 => Ok(InstanceStatus::Active),
            2 => Ok(InstanceStatus::Suspended),
            3 => Ok(InstanceStatus::Retired),
            other => Err(Error::UnknownStatus(other)),
        }
    }

    /// Whether this status counts as "live" for enumeration queries.
    pub fn is_live(self) -> bool {
        matches!(self, InstanceStatus::Provisioning | InstanceStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_round_trip() {
        for status in [
            InstanceStatus::Provisioning,
            InstanceStatus::Active,
            InstanceStatus::Suspended,
            InstanceStatus::Retired,
        ] {
            assert_eq!(InstanceStatus::from_i64(status.as_i64()).unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_code_is_error() {
        let err = InstanceStatus::from_i64(99).unwrap_err();
        assert!(matches!(err, Error::UnknownStatus(99)));
    }

    #[test]
    fn test_liveness() {
        assert!(InstanceStatus::Active.is_live());
        assert!(InstanceStatus::Provisioning.is_live());
        assert!(!InstanceStatus::Retired.is_live());
        assert!(!InstanceStatus::Suspended.is_live());
    }
}
