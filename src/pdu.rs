//! The SCA+TPDU outer frame: header bit layouts for SMS-DELIVER and SMS-SUBMIT, and the
//! `Message` type that assembles/parses both.
use derive_is_enum_variant::is_enum_variant;
use log::{debug, trace};
use num_derive::FromPrimitive;
use crate::address::PhoneNumber;
use crate::errors::{PduError, PduResult};
use crate::gsm7;
use crate::timestamp::Timestamp;
use crate::ucs2;
use crate::util::PduFromPrimitive;
use crate::validity::ValidityPeriod;

/// Message Type Indicator, bits 0–1 of the first TPDU octet. STATUS-REPORT and COMMAND PDUs are
/// out of scope; any MTI other than DELIVER/SUBMIT fails with `UnknownMessageType`.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromPrimitive, is_enum_variant)]
pub enum MessageType {
    Deliver = 0b00,
    Submit = 0b01,
}

/// Data Coding Scheme, restricted to the two encodings this crate understands.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromPrimitive, is_enum_variant)]
pub enum MessageEncoding {
    Gsm7Bit = 0x00,
    Ucs2 = 0x08,
}

/// Validity Period Format, bits 3–4 of the SUBMIT first octet. Only `Relative` is supported for
/// encode/decode of the VP field itself; `Enhanced` and `Absolute` are recognized but rejected.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromPrimitive, is_enum_variant)]
pub enum VpFormat {
    NotPresent = 0b00,
    Enhanced = 0b01,
    Relative = 0b10,
    Absolute = 0b11,
}

/// A logical SMS message, in either the DELIVER or SUBMIT direction. Fields that only apply to
/// one direction are `None`/ignored for the other; `encode` validates that the fields needed for
/// `message_type` are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub message_type: MessageType,
    pub encoding: MessageEncoding,
    pub vp_format: VpFormat,
    pub vp: Option<ValidityPeriod>,
    pub service_center_time: Option<Timestamp>,
    pub service_center_address: Option<PhoneNumber>,
    pub address: PhoneNumber,
    pub text: String,
    pub message_reference: Option<u8>,
    pub reply_path: bool,
    pub udh_indicator: bool,
    pub status_report_indication: bool,
    pub status_report_request: bool,
    pub more_messages_to_send: bool,
    pub loop_prevention: bool,
    pub reject_duplicates: bool,
}

impl Message {
    /// Encodes this message into `(tpdu_length, full_bytes)`: `tpdu_length` excludes the leading
    /// SCA block, matching what an `AT+CMGS` command expects.
    pub fn encode(&self) -> PduResult<(usize, Vec<u8>)> {
        match self.message_type {
            MessageType::Deliver => self.encode_deliver(),
            MessageType::Submit => self.encode_submit(),
        }
    }

    fn encode_sca(&self) -> Vec<u8> {
        let mut ret = vec![];
        match &self.service_center_address {
            Some(addr) => {
                let (_, bytes) = addr.encode();
                ret.push(bytes.len() as u8);
                ret.extend(bytes);
            }
            None => ret.push(0),
        }
        ret
    }

    fn encode_user_data(&self) -> PduResult<(u8, Vec<u8>)> {
        match self.encoding {
            MessageEncoding::Gsm7Bit => gsm7::encode_7bit(&self.text),
            MessageEncoding::Ucs2 => {
                let bytes = ucs2::encode_ucs2(&self.text)?;
                let len = bytes.len();
                if len > 255 {
                    return Err(PduError::IncorrectSize("UCS-2 user data too long"));
                }
                Ok((bytes, len as u8))
            }
        }
    }

    fn encode_deliver(&self) -> PduResult<(usize, Vec<u8>)> {
        let mut ret = self.encode_sca();
        let sca_len = ret.len();

        let mut first_octet = MessageType::Deliver as u8;
        if !self.more_messages_to_send {
            first_octet |= 0b0000_0100;
        }
        if self.loop_prevention {
            first_octet |= 0b0000_1000;
        }
        if self.status_report_indication {
            first_octet |= 0b0001_0000;
        }
        if self.udh_indicator {
            first_octet |= 0b0010_0000;
        }
        if self.reply_path {
            first_octet |= 0b0100_0000;
        }
        ret.push(first_octet);

        let (digit_count, addr_bytes) = self.address.encode();
        ret.push(digit_count);
        ret.extend(addr_bytes);

        ret.push(0x00); // Protocol Identifier
        ret.push(self.encoding as u8);

        let timestamp = self.service_center_time
            .ok_or(PduError::Truncated("DELIVER requires service_center_time"))?;
        ret.extend(&timestamp.encode());

        let (user_data, udl) = self.encode_user_data()?;
        ret.push(udl);
        ret.extend(user_data);

        let tpdu_len = ret.len() - sca_len;
        trace!("encoded DELIVER: {} TPDU bytes ({} total with SCA)", tpdu_len, ret.len());
        Ok((tpdu_len, ret))
    }

    fn encode_submit(&self) -> PduResult<(usize, Vec<u8>)> {
        if self.vp_format == VpFormat::Enhanced || self.vp_format == VpFormat::Absolute {
            return Err(PduError::NonRelativeUnsupported);
        }
        let mut ret = self.encode_sca();
        let sca_len = ret.len();

        let mut first_octet = MessageType::Submit as u8;
        if self.reject_duplicates {
            first_octet |= 0b0000_0100;
        }
        first_octet |= (self.vp_format as u8) << 3;
        if self.status_report_request {
            first_octet |= 0b0010_0000;
        }
        if self.udh_indicator {
            first_octet |= 0b0100_0000;
        }
        if self.reply_path {
            first_octet |= 0b1000_0000;
        }
        ret.push(first_octet);

        ret.push(self.message_reference.unwrap_or(0));

        let (digit_count, addr_bytes) = self.address.encode();
        ret.push(digit_count);
        ret.extend(addr_bytes);

        ret.push(0x00); // Protocol Identifier
        ret.push(self.encoding as u8);

        if self.vp_format == VpFormat::Relative {
            let vp = self.vp.ok_or(PduError::Truncated("SUBMIT VPF=Relative requires vp"))?;
            ret.push(vp.to_octet());
        }

        let (user_data, udl) = self.encode_user_data()?;
        ret.push(udl);
        ret.extend(user_data);

        let tpdu_len = ret.len() - sca_len;
        trace!("encoded SUBMIT: {} TPDU bytes ({} total with SCA)", tpdu_len, ret.len());
        Ok((tpdu_len, ret))
    }

    /// Decodes a message from a full SCA-prefixed octet stream, returning the number of bytes
    /// consumed alongside the parsed message.
    pub fn decode(bytes: &[u8]) -> PduResult<(usize, Message)> {
        let sca_len = *bytes.first().ok_or(PduError::Truncated("SCA length byte"))? as usize;
        if sca_len > 12 {
            return Err(PduError::IncorrectSize("SCA address exceeds 12 octets"));
        }
        let mut pos = 1;
        let service_center_address = if sca_len == 0 {
            None
        } else {
            let body = bytes.get(pos..pos + sca_len)
                .ok_or(PduError::Truncated("SCA body"))?;
            pos += sca_len;
            Some(PhoneNumber::decode_sca(body[0], &body[1..])?)
        };

        let first_octet = *bytes.get(pos).ok_or(PduError::Truncated("PDU-Type octet"))?;
        let mti = first_octet & 0b11;
        let message_type = MessageType::from_raw("MTI", mti)
            .map_err(|_| PduError::UnknownMessageType(mti))?;

        let (consumed_after_sca, message) = match message_type {
            MessageType::Deliver => Self::decode_deliver(&bytes[pos..], first_octet)?,
            MessageType::Submit => Self::decode_submit(&bytes[pos..], first_octet)?,
        };
        let total = pos + consumed_after_sca;
        trace!("decoded {:?}: {} bytes consumed", message.message_type, total);
        Ok((total, message))
    }

    fn decode_address(bytes: &[u8]) -> PduResult<(usize, PhoneNumber)> {
        let digit_count = *bytes.first().ok_or(PduError::Truncated("address length byte"))?;
        if digit_count > 12 {
            return Err(PduError::IncorrectSize("address exceeds 12 digits"));
        }
        let byte_count = (digit_count as usize + 1) / 2;
        let toa = *bytes.get(1).ok_or(PduError::Truncated("TOA byte"))?;
        let body = bytes.get(2..2 + byte_count).ok_or(PduError::Truncated("address digits"))?;
        let addr = PhoneNumber::decode(toa, body, digit_count)?;
        Ok((2 + byte_count, addr))
    }

    fn decode_user_data(bytes: &[u8], encoding: MessageEncoding) -> PduResult<(usize, String)> {
        let udl = *bytes.first().ok_or(PduError::Truncated("UDL byte"))?;
        let text = match encoding {
            MessageEncoding::Gsm7Bit => {
                let octet_count = ((udl as usize) * 7 + 7) / 8;
                let data = bytes.get(1..1 + octet_count)
                    .ok_or(PduError::Truncated("7-bit user data"))?;
                gsm7::decode_7bit(data, udl)?
            }
            MessageEncoding::Ucs2 => {
                let data = bytes.get(1..1 + udl as usize)
                    .ok_or(PduError::Truncated("UCS-2 user data"))?;
                ucs2::decode_ucs2(data)?
            }
        };
        let octet_count = match encoding {
            MessageEncoding::Gsm7Bit => ((udl as usize) * 7 + 7) / 8,
            MessageEncoding::Ucs2 => udl as usize,
        };
        Ok((1 + octet_count, text))
    }

    fn decode_deliver(bytes: &[u8], first_octet: u8) -> PduResult<(usize, Message)> {
        let mut pos = 1;
        let more_messages_to_send = first_octet & 0b0000_0100 == 0;
        let loop_prevention = first_octet & 0b0000_1000 != 0;
        let status_report_indication = first_octet & 0b0001_0000 != 0;
        let udh_indicator = first_octet & 0b0010_0000 != 0;
        let reply_path = first_octet & 0b0100_0000 != 0;

        let (used, address) = Self::decode_address(&bytes[pos..])?;
        pos += used;

        let _protocol_identifier = *bytes.get(pos).ok_or(PduError::Truncated("PI byte"))?;
        pos += 1;
        let dcs = *bytes.get(pos).ok_or(PduError::Truncated("DCS byte"))?;
        let encoding = MessageEncoding::from_raw("DCS", dcs)
            .map_err(|_| PduError::UnsupportedEncoding(dcs))?;
        pos += 1;

        let ts_bytes = bytes.get(pos..pos + 7).ok_or(PduError::Truncated("timestamp"))?;
        let service_center_time = Timestamp::decode(ts_bytes)?;
        pos += 7;

        let (used, text) = Self::decode_user_data(&bytes[pos..], encoding)?;
        pos += used;

        debug!("decoded DELIVER from {}", address.display());
        Ok((pos, Message {
            message_type: MessageType::Deliver,
            encoding,
            vp_format: VpFormat::NotPresent,
            vp: None,
            service_center_time: Some(service_center_time),
            service_center_address: None,
            address,
            text,
            message_reference: None,
            reply_path,
            udh_indicator,
            status_report_indication,
            status_report_request: false,
            more_messages_to_send,
            loop_prevention,
            reject_duplicates: false,
        }))
    }

    fn decode_submit(bytes: &[u8], first_octet: u8) -> PduResult<(usize, Message)> {
        let mut pos = 1;
        let reject_duplicates = first_octet & 0b0000_0100 != 0;
        let vpf_bits = (first_octet >> 3) & 0b11;
        let vp_format = VpFormat::from_raw("VPF", vpf_bits)?;
        let status_report_request = first_octet & 0b0010_0000 != 0;
        let udh_indicator = first_octet & 0b0100_0000 != 0;
        let reply_path = first_octet & 0b1000_0000 != 0;

        let message_reference = *bytes.get(pos).ok_or(PduError::Truncated("message reference"))?;
        pos += 1;

        let (used, address) = Self::decode_address(&bytes[pos..])?;
        pos += used;

        let _protocol_identifier = *bytes.get(pos).ok_or(PduError::Truncated("PI byte"))?;
        pos += 1;
        let dcs = *bytes.get(pos).ok_or(PduError::Truncated("DCS byte"))?;
        let encoding = MessageEncoding::from_raw("DCS", dcs)
            .map_err(|_| PduError::UnsupportedEncoding(dcs))?;
        pos += 1;

        let vp = match vp_format {
            VpFormat::NotPresent => None,
            VpFormat::Relative => {
                let octet = *bytes.get(pos).ok_or(PduError::Truncated("VP byte"))?;
                pos += 1;
                Some(ValidityPeriod::from_octet(octet))
            }
            VpFormat::Enhanced | VpFormat::Absolute => {
                return Err(PduError::NonRelativeUnsupported);
            }
        };

        let (used, text) = Self::decode_user_data(&bytes[pos..], encoding)?;
        pos += used;

        debug!("decoded SUBMIT to {}", address.display());
        Ok((pos, Message {
            message_type: MessageType::Submit,
            encoding,
            vp_format,
            vp,
            service_center_time: None,
            service_center_address: None,
            address,
            text,
            message_reference: Some(message_reference),
            reply_path,
            udh_indicator,
            status_report_indication: false,
            status_report_request,
            more_messages_to_send: true,
            loop_prevention: false,
            reject_duplicates,
        }))
    }
}
