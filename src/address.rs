//! The phone number / Type-of-Address field shared by the SCA, originating and destination
//! address positions.
use derive_is_enum_variant::is_enum_variant;
use log::trace;
use num_derive::FromPrimitive;
use crate::errors::{PduError, PduResult};
use crate::semi_octet::{encode_digits, decode_digits};
use crate::util::PduFromPrimitive;

const TOA_INTERNATIONAL: u8 = 0x91;
const TOA_NATIONAL: u8 = 0xA1;

/// Bits 4–6 of the Type-of-Address byte. Values are pre-shifted into byte position so they can
/// be OR'd straight into the TOA octet.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromPrimitive, is_enum_variant)]
pub enum TypeOfNumber {
    Unknown = 0b000_0000,
    International = 0b001_0000,
    National = 0b010_0000,
    Special = 0b011_0000,
    Gsm = 0b101_0000,
    Short = 0b110_0000,
    Reserved = 0b111_0000,
}

/// Bits 0–3 of the Type-of-Address byte.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromPrimitive, is_enum_variant)]
pub enum NumberingPlanIdentification {
    NetworkDetermined = 0b0000,
    IsdnTelephone = 0b0001,
    Data = 0b0011,
    Telex = 0b0100,
    National = 0b1000,
    Private = 0b1001,
    Ermes = 0b1010,
}

/// A parsed Type-of-Address byte, for callers who want more than the international/national
/// flag `PhoneNumber` exposes directly (e.g. inspecting a captured PDU's raw TOA).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TypeOfAddress {
    pub type_of_number: TypeOfNumber,
    pub numbering_plan_identification: NumberingPlanIdentification,
}

impl TypeOfAddress {
    pub fn from_byte(byte: u8) -> PduResult<Self> {
        Ok(TypeOfAddress {
            type_of_number: TypeOfNumber::from_raw("type of number", byte & 0x70)?,
            numbering_plan_identification: NumberingPlanIdentification::from_raw(
                "numbering plan identification",
                byte & 0x0F,
            )?,
        })
    }

    pub fn as_u8(self) -> u8 {
        0x80 | self.type_of_number as u8 | self.numbering_plan_identification as u8
    }
}

/// A decimal phone number with an international/national flag, as carried by a TPDU address
/// field. Encoding strips any leading `+`; decoding restores it from the TOA byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    digits: Vec<u8>,
    international: bool,
}

impl PhoneNumber {
    /// Builds a `PhoneNumber` from a human-readable string such as `"+79995554433"`. A leading
    /// `+` marks it international; every other character must be a decimal digit.
    pub fn new(number: &str) -> PduResult<Self> {
        let international = number.starts_with('+');
        let body = if international { &number[1..] } else { number };
        let mut digits = Vec::with_capacity(body.len());
        for c in body.chars() {
            let d = c.to_digit(10).ok_or(PduError::InvalidDigits)? as u8;
            digits.push(d);
        }
        if digits.len() > 12 {
            return Err(PduError::IncorrectSize("phone number exceeds 12 digits"));
        }
        Ok(PhoneNumber { digits, international })
    }

    /// The Type-of-Address byte: `0x91` international, `0xA1` national.
    pub fn type_of_address(&self) -> u8 {
        if self.international { TOA_INTERNATIONAL } else { TOA_NATIONAL }
    }

    /// Renders the number back into display form, restoring the leading `+` if international.
    pub fn display(&self) -> String {
        let body: String = self.digits.iter().map(|d| (b'0' + d) as char).collect();
        if self.international {
            format!("+{}", body)
        } else {
            body
        }
    }

    /// Encodes this number into (digit count, TOA byte ∥ semi-octet digits).
    pub fn encode(&self) -> (u8, Vec<u8>) {
        let mut bytes = vec![self.type_of_address()];
        bytes.extend(encode_digits(&self.digits));
        trace!("encoded phone number ({} digits) into {} bytes", self.digits.len(), bytes.len());
        (self.digits.len() as u8, bytes)
    }

    /// Decodes a number from its TOA byte plus semi-octet digit bytes, given the digit count
    /// declared by the TPDU's address length field.
    pub fn decode(toa: u8, body: &[u8], digit_count: u8) -> PduResult<Self> {
        let international = toa & 0x10 != 0;
        let mut digits = decode_digits(body)?;
        digits.truncate(digit_count as usize);
        if digits.len() != digit_count as usize {
            return Err(PduError::Truncated("phone number digits"));
        }
        Ok(PhoneNumber { digits, international })
    }

    /// Decodes a Service Centre Address, which carries only an octet count rather than a digit
    /// count: the digit count is whatever `decode_digits` naturally yields (it stops at the
    /// first `0xF` pad nibble).
    pub fn decode_sca(toa: u8, body: &[u8]) -> PduResult<Self> {
        let international = toa & 0x10 != 0;
        let digits = decode_digits(body)?;
        Ok(PhoneNumber { digits, international })
    }
}
