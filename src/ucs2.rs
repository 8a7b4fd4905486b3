//! UCS-2 (big-endian UTF-16) user data codec, per 3GPP TS 23.038.
use encoding::{Encoding, EncoderTrap, DecoderTrap};
use encoding::all::UTF_16BE;
use log::{debug, trace};
use crate::errors::{PduError, PduResult};

/// Encodes text as big-endian UCS-2 octets. Code points above U+FFFF are emitted as surrogate
/// pairs; this isn't strict UCS-2, but modems treat the User Data Length as an octet count and
/// pass the pair through untouched, so it round-trips.
pub fn encode_ucs2(text: &str) -> PduResult<Vec<u8>> {
    if let Some(c) = text.chars().find(|c| *c as u32 > 0xFFFF) {
        debug!("emitting surrogate pair for {:?}", c);
    }
    let bytes = UTF_16BE.encode(text, EncoderTrap::Strict)
        .map_err(|_| PduError::UnmappableChar('\u{FFFD}'))?;
    trace!("encoded {} chars into {} UCS-2 octets", text.chars().count(), bytes.len());
    Ok(bytes)
}

/// Decodes big-endian UCS-2 octets into text. The byte slice must have even length.
pub fn decode_ucs2(bytes: &[u8]) -> PduResult<String> {
    if bytes.len() % 2 != 0 {
        return Err(PduError::IncorrectSize("UCS-2 user data length must be even"));
    }
    UTF_16BE.decode(bytes, DecoderTrap::Strict)
        .map_err(|_| PduError::IncorrectSize("invalid UCS-2 octet sequence"))
}
