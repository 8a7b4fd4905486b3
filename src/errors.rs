//! Error handling.
use failure::Fail;

/// An error raised while encoding or decoding an SMS TPDU.
///
/// Exhaustive matching is NOT guaranteed by this crate's API (!).
#[derive(Fail, Debug, Clone, PartialEq, Eq)]
pub enum PduError {
    /// The Data Coding Scheme byte was not one of the two encodings this crate understands.
    #[fail(display = "unsupported Data Coding Scheme byte: {:#04x}", _0)]
    UnsupportedEncoding(u8),
    /// The Message Type Indicator bits decoded to a type this crate doesn't implement.
    #[fail(display = "unknown Message Type Indicator: {:#04b}", _0)]
    UnknownMessageType(u8),
    /// The PDU specified an Enhanced or Absolute Validity Period, which this version doesn't
    /// support; only the relative format is implemented.
    #[fail(display = "non-relative validity period formats are not supported")]
    NonRelativeUnsupported,
    /// A length-prefixed field declared a length past the protocol maximum, an odd-length UCS-2
    /// payload turned up, or a timestamp block was the wrong size.
    #[fail(display = "field length out of range: {}", _0)]
    IncorrectSize(&'static str),
    /// A character in the message text has no representation in the GSM 7-bit default alphabet
    /// or its extension table.
    #[fail(display = "character {:?} is not representable in the GSM 7-bit alphabet", _0)]
    UnmappableChar(char),
    /// A 7-bit septet stream ended on a lone `0x1B` escape prefix.
    #[fail(display = "7-bit data ends on a truncated escape sequence")]
    TruncatedEscape,
    /// The input ended before a required field was fully read.
    #[fail(display = "truncated PDU: {}", _0)]
    Truncated(&'static str),
    /// A phone number contained characters that weren't decimal digits (after stripping a
    /// leading `+`), or a semi-octet field decoded to an illegal digit value.
    #[fail(display = "invalid digits in phone number or semi-octet field")]
    InvalidDigits,
    /// A raw byte didn't correspond to any variant of a `#[repr(u8)]` field enum.
    #[fail(display = "value out of range for {}: {}", _0, _1)]
    ValueOutOfRange(&'static str, u8),
}

/// Bog-standard result type alias for this crate.
pub type PduResult<T> = Result<T, PduError>;
