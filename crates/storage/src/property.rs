//! The type-dispatch codec: a closed conversion surface.
//!
//! Every shape that can reach the store implements [`Property`]. The impl
//! set is the dispatch table: which column store receives a value is fixed
//! at compile time by `Property::KIND`, so no unhandled shape can fall into
//! a fallback branch silently. The precedence of the original dispatch
//! survives as which impl applies to a given Rust type:
//!
//! 1. [`InstanceStatus`] → integer store (plus the status index, handled by
//!    the engine when the key is the existence slot)
//! 2. Fixed-width integers → integer store, checked widen/narrow
//! 3. `Option<integer>` → integer store, `None` as NULL
//! 4. `f32`/`f64` and optionals → double store
//! 5. `String` / `Option<String>` → text store, verbatim
//! 6. `Vec<u8>` / `Option<Vec<u8>>` → blob store, verbatim
//! 7. `Option<Encoded<T>>` → blob store, NULL or codec bytes
//! 8. [`Encoded<T>`] → blob store, codec bytes (non-optional fallback)
//!
//! ## Nullability flattening
//!
//! A blanket impl for `Option<T: Property>` flattens exactly one optional
//! level into row-presence/NULL. Deeper nesting re-enters the inner impl:
//! for plain column types the inner `None` lands on the same NULL (lossy,
//! documented); for `Encoded` values the nesting is handed to the byte
//! codec, which may or may not preserve it.

use crate::codec::ValueCodec;
use propstore_core::{Error, InstanceStatus, RawValue, Result, StorageKind};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A read slot: outer `None` = no row, `Some(None)` = row with NULL,
/// `Some(Some(raw))` = row with a value.
pub type Slot = Option<Option<RawValue>>;

/// Conversion between a storable shape and its physical column form.
///
/// Implementations are the closed set listed in the module docs. Domain
/// values not in the set must be explicitly wrapped in [`Encoded`] before
/// they can reach the store.
pub trait Property: Sized {
    /// Column store this shape dispatches to.
    const KIND: StorageKind;

    /// Status payload, if this write is a lifecycle status.
    ///
    /// The engine uses this to maintain the instance status index for
    /// writes to the existence slot.
    fn as_status(&self) -> Option<InstanceStatus> {
        None
    }

    /// Convert into a column slot; `None` is stored as SQL NULL.
    fn to_column<C: ValueCodec>(self, codec: &C) -> Result<Option<RawValue>>;

    /// Rebuild from a read slot.
    ///
    /// Returns `Ok(None)` when the slot holds no usable value for this
    /// shape (no row, or a NULL row read as a non-optional type).
    fn from_column<C: ValueCodec>(slot: Slot, codec: &C) -> Result<Option<Self>>;
}

macro_rules! impl_int_property {
    ($($t:ty),* $(,)?) => {$(
        impl Property for $t {
            const KIND: StorageKind = StorageKind::Int;

            fn to_column<C: ValueCodec>(self, _codec: &C) -> Result<Option<RawValue>> {
                let wide = i64::try_from(self)
                    .map_err(|_| Error::numeric_range(self, "i64"))?;
                Ok(Some(RawValue::Int(wide)))
            }

            fn from_column<C: ValueCodec>(slot: Slot, _codec: &C) -> Result<Option<Self>> {
                match slot {
                    Some(Some(raw)) => {
                        let wide = raw.into_int()?;
                        let narrow = <$t>::try_from(wide)
                            .map_err(|_| Error::numeric_range(wide, stringify!($t)))?;
                        Ok(Some(narrow))
                    }
                    _ => Ok(None),
                }
            }
        }
    )*};
}

impl_int_property!(i8, i16, i32, i64, u8, u16, u32, u64);

impl Property for f64 {
    const KIND: StorageKind = StorageKind::Double;

    fn to_column<C: ValueCodec>(self, _codec: &C) -> Result<Option<RawValue>> {
        Ok(Some(RawValue::Double(self)))
    }

    fn from_column<C: ValueCodec>(slot: Slot, _codec: &C) -> Result<Option<Self>> {
        match slot {
            Some(Some(raw)) => Ok(Some(raw.into_double()?)),
            _ => Ok(None),
        }
    }
}

impl Property for f32 {
    const KIND: StorageKind = StorageKind::Double;

    fn to_column<C: ValueCodec>(self, _codec: &C) -> Result<Option<RawValue>> {
        // f32 -> f64 widening is exact
        Ok(Some(RawValue::Double(self as f64)))
    }

    fn from_column<C: ValueCodec>(slot: Slot, _codec: &C) -> Result<Option<Self>> {
        match slot {
            Some(Some(raw)) => {
                let wide = raw.into_double()?;
                let narrow = wide as f32;
                if narrow.is_infinite() && wide.is_finite() {
                    return Err(Error::numeric_range(wide, "f32"));
                }
                Ok(Some(narrow))
            }
            _ => Ok(None),
        }
    }
}

impl Property for String {
    const KIND: StorageKind = StorageKind::Text;

    fn to_column<C: ValueCodec>(self, _codec: &C) -> Result<Option<RawValue>> {
        Ok(Some(RawValue::Text(self)))
    }

    fn from_column<C: ValueCodec>(slot: Slot, _codec: &C) -> Result<Option<Self>> {
        match slot {
            Some(Some(raw)) => Ok(Some(raw.into_text()?)),
            _ => Ok(None),
        }
    }
}

impl Property for Vec<u8> {
    const KIND: StorageKind = StorageKind::Blob;

    fn to_column<C: ValueCodec>(self, _codec: &C) -> Result<Option<RawValue>> {
        Ok(Some(RawValue::Blob(self)))
    }

    fn from_column<C: ValueCodec>(slot: Slot, _codec: &C) -> Result<Option<Self>> {
        match slot {
            Some(Some(raw)) => Ok(Some(raw.into_blob()?)),
            _ => Ok(None),
        }
    }
}

impl Property for InstanceStatus {
    const KIND: StorageKind = StorageKind::Int;

    fn as_status(&self) -> Option<InstanceStatus> {
        Some(*self)
    }

    fn to_column<C: ValueCodec>(self, _codec: &C) -> Result<Option<RawValue>> {
        Ok(Some(RawValue::Int(self.as_i64())))
    }

    fn from_column<C: ValueCodec>(slot: Slot, _codec: &C) -> Result<Option<Self>> {
        match slot {
            Some(Some(raw)) => Ok(Some(InstanceStatus::from_i64(raw.into_int()?)?)),
            _ => Ok(None),
        }
    }
}

/// One level of optionality, flattened to row-presence/NULL.
///
/// - write `None` → present row with NULL
/// - read absent row → `Ok(None)` ("never set")
/// - read NULL row → `Ok(Some(None))` ("explicitly nil")
impl<T: Property> Property for Option<T> {
    const KIND: StorageKind = T::KIND;

    fn as_status(&self) -> Option<InstanceStatus> {
        self.as_ref().and_then(|v| v.as_status())
    }

    fn to_column<C: ValueCodec>(self, codec: &C) -> Result<Option<RawValue>> {
        match self {
            None => Ok(None),
            Some(inner) => inner.to_column(codec),
        }
    }

    fn from_column<C: ValueCodec>(slot: Slot, codec: &C) -> Result<Option<Self>> {
        match slot {
            None => Ok(None),
            Some(None) => Ok(Some(None)),
            present => Ok(T::from_column(present, codec)?.map(Some)),
        }
    }
}

/// Explicit wrapper routing a serde value through the byte codec.
///
/// This is the fallback branch of the dispatch table, made explicit: a
/// domain value with no column representation is stored as codec bytes in
/// the blob store by wrapping it in `Encoded`. `Option<Encoded<T>>` gets
/// the usual one-level NULL flattening; nesting inside `T` is the codec's
/// business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoded<T>(
    /// The wrapped domain value.
    pub T,
);

impl<T> Encoded<T> {
    /// Unwrap the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Serialize + DeserializeOwned> Property for Encoded<T> {
    const KIND: StorageKind = StorageKind::Blob;

    fn to_column<C: ValueCodec>(self, codec: &C) -> Result<Option<RawValue>> {
        let bytes = codec.encode(&self.0)?;
        Ok(Some(RawValue::Blob(bytes)))
    }

    fn from_column<C: ValueCodec>(slot: Slot, codec: &C) -> Result<Option<Self>> {
        match slot {
            Some(Some(raw)) => {
                let bytes = raw.into_blob()?;
                Ok(Some(Encoded(codec.decode(&bytes)?)))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{BincodeCodec, JsonCodec};
    use proptest::prelude::*;
    use serde::{Deserialize, Serialize};

    fn slot_of(raw: RawValue) -> Slot {
        Some(Some(raw))
    }

    #[test]
    fn test_int_widen_narrow_round_trip() {
        let codec = JsonCodec;
        let column = 42u8.to_column(&codec).unwrap();
        assert_eq!(column, Some(RawValue::Int(42)));
        let back = u8::from_column(Some(column), &codec).unwrap();
        assert_eq!(back, Some(42));
    }

    #[test]
    fn test_narrowing_overflow_is_error_not_truncation() {
        let codec = JsonCodec;
        let err = i8::from_column(slot_of(RawValue::Int(300)), &codec).unwrap_err();
        assert!(matches!(err, Error::NumericRange { .. }));
    }

    #[test]
    fn test_u64_above_i64_max_rejected_on_write() {
        let codec = JsonCodec;
        let err = u64::MAX.to_column(&codec).unwrap_err();
        assert!(matches!(err, Error::NumericRange { .. }));
    }

    #[test]
    fn test_negative_rejected_for_unsigned_read() {
        let codec = JsonCodec;
        let err = u32::from_column(slot_of(RawValue::Int(-1)), &codec).unwrap_err();
        assert!(matches!(err, Error::NumericRange { .. }));
    }

    #[test]
    fn test_optional_write_none_is_null_column() {
        let codec = JsonCodec;
        let column = None::<i64>.to_column(&codec).unwrap();
        assert_eq!(column, None);
    }

    #[test]
    fn test_optional_read_distinguishes_unset_from_nil() {
        let codec = JsonCodec;
        // No row at all
        assert_eq!(Option::<i64>::from_column(None, &codec).unwrap(), None);
        // Row with NULL
        assert_eq!(
            Option::<i64>::from_column(Some(None), &codec).unwrap(),
            Some(None)
        );
        // Row with a value
        assert_eq!(
            Option::<i64>::from_column(slot_of(RawValue::Int(5)), &codec).unwrap(),
            Some(Some(5))
        );
    }

    #[test]
    fn test_nested_optional_wraps_to_requested_depth() {
        let codec = JsonCodec;
        let read = Option::<Option<i64>>::from_column(slot_of(RawValue::Int(5)), &codec).unwrap();
        assert_eq!(read, Some(Some(Some(5))));

        // A NULL row reads as the flattened nil at the top wrapped level.
        let read = Option::<Option<i64>>::from_column(Some(None), &codec).unwrap();
        assert_eq!(read, Some(None));
    }

    #[test]
    fn test_nested_optional_write_collapses_inner_nil() {
        // Some(None) flattens onto the same NULL as None: the one-level
        // contract, lossy by design.
        let codec = JsonCodec;
        let column = Some(None::<i64>).to_column(&codec).unwrap();
        assert_eq!(column, None);
    }

    #[test]
    fn test_non_optional_read_of_null_row_is_no_value() {
        let codec = JsonCodec;
        assert_eq!(i64::from_column(Some(None), &codec).unwrap(), None);
        assert_eq!(String::from_column(Some(None), &codec).unwrap(), None);
    }

    #[test]
    fn test_status_dispatches_to_int_with_status_payload() {
        let codec = JsonCodec;
        let status = InstanceStatus::Active;
        assert_eq!(InstanceStatus::KIND, StorageKind::Int);
        assert_eq!(status.as_status(), Some(InstanceStatus::Active));
        assert_eq!(Some(status).as_status(), Some(InstanceStatus::Active));
        assert_eq!(None::<InstanceStatus>.as_status(), None);

        let column = status.to_column(&codec).unwrap();
        let back = InstanceStatus::from_column(Some(column), &codec).unwrap();
        assert_eq!(back, Some(InstanceStatus::Active));
    }

    #[test]
    fn test_unknown_status_code_is_decode_error() {
        let codec = JsonCodec;
        let err = InstanceStatus::from_column(slot_of(RawValue::Int(77)), &codec).unwrap_err();
        assert!(matches!(err, Error::UnknownStatus(77)));
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct DiskShape {
        path: String,
        read_only: bool,
    }

    #[test]
    fn test_encoded_fallback_round_trip() {
        let codec = BincodeCodec;
        let value = DiskShape {
            path: "/dev/vda".into(),
            read_only: false,
        };
        let column = Encoded(value.clone()).to_column(&codec).unwrap();
        assert!(matches!(column, Some(RawValue::Blob(_))));

        let back = Encoded::<DiskShape>::from_column(Some(column), &codec).unwrap();
        assert_eq!(back.map(Encoded::into_inner), Some(value));
    }

    #[test]
    fn test_optional_encoded_null_flattening() {
        let codec = JsonCodec;
        let column = None::<Encoded<DiskShape>>.to_column(&codec).unwrap();
        assert_eq!(column, None);

        let read = Option::<Encoded<DiskShape>>::from_column(Some(None), &codec).unwrap();
        assert!(matches!(read, Some(None)));
    }

    #[test]
    fn test_encoded_decode_failure_propagates() {
        let codec = JsonCodec;
        let err =
            Encoded::<DiskShape>::from_column(slot_of(RawValue::Blob(b"garbage".to_vec())), &codec)
                .unwrap_err();
        assert!(matches!(err, Error::Codec(_)));
    }

    #[test]
    fn test_text_and_blob_are_verbatim() {
        let codec = JsonCodec;
        let column = "héllo".to_string().to_column(&codec).unwrap();
        assert_eq!(column, Some(RawValue::Text("héllo".into())));

        let column = vec![0u8, 255, 1].to_column(&codec).unwrap();
        assert_eq!(column, Some(RawValue::Blob(vec![0, 255, 1])));
    }

    proptest! {
        #[test]
        fn prop_i32_round_trips_through_int_column(v in any::<i32>()) {
            let codec = JsonCodec;
            let column = v.to_column(&codec).unwrap();
            let back = i32::from_column(Some(column), &codec).unwrap();
            prop_assert_eq!(back, Some(v));
        }

        #[test]
        fn prop_i64_out_of_u16_range_never_truncates(v in any::<i64>()) {
            let codec = JsonCodec;
            let result = u16::from_column(Some(Some(RawValue::Int(v))), &codec);
            if (0..=u16::MAX as i64).contains(&v) {
                prop_assert_eq!(result.unwrap(), Some(v as u16));
            } else {
                prop_assert!(result.is_err());
            }
        }
    }
}
