//! Helper trait for converting raw bytes into `#[repr(u8)]` field enums.
use num::FromPrimitive;
use crate::errors::{PduError, PduResult};

/// Converts a raw byte into a `#[repr(u8)]` field enum that derives `FromPrimitive`, reporting an
/// out-of-range value as `PduError::ValueOutOfRange` rather than panicking. Direct descendant of
/// the modem crate's `HuaweiFromPrimitive`, generalised over any `FromPrimitive` target.
pub trait PduFromPrimitive: Sized {
    fn from_raw(field: &'static str, raw: u8) -> PduResult<Self>;
}

impl<T> PduFromPrimitive for T where T: FromPrimitive {
    fn from_raw(field: &'static str, raw: u8) -> PduResult<T> {
        T::from_u8(raw).ok_or_else(|| PduError::ValueOutOfRange(field, raw))
    }
}
