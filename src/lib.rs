//! A codec for 3GPP TS 23.040 SMS Transport Protocol Data Units (TPDUs), covering the
//! SMS-DELIVER and SMS-SUBMIT directions: the bit-packed TPDU header, semi-octet addresses and
//! timestamps, GSM 03.38 7-bit packing, and UCS-2 text.
//!
//! This crate is a pure codec: no modem transport, no I/O, no concatenation beyond the UDHI
//! flag. Hex-encoding the produced octet stream for an AT interface, and any multi-part
//! concatenated-SMS reassembly, are the caller's responsibility.
pub mod address;
pub mod errors;
pub mod gsm7;
pub mod pdu;
pub mod semi_octet;
pub mod timestamp;
pub mod ucs2;
pub mod util;
pub mod validity;

pub use address::{NumberingPlanIdentification, PhoneNumber, TypeOfAddress, TypeOfNumber};
pub use errors::{PduError, PduResult};
pub use gsm7::{decode_7bit, encode_7bit, gsm7bit_pack_ussd};
pub use pdu::{Message, MessageEncoding, MessageType, VpFormat};
pub use timestamp::Timestamp;
pub use ucs2::{decode_ucs2, encode_ucs2};
pub use validity::ValidityPeriod;
