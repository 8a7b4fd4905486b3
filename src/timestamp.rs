//! The 7-byte Service Centre Timestamp / Validity-Period-Absolute field: a semi-octet calendar
//! moment plus a signed quarter-hour UTC offset.
use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike, Utc};
use log::trace;
use crate::errors::{PduError, PduResult};
use crate::semi_octet::{decode_semi_octets, encode_semi_octets};

/// An absolute instant as carried on the wire: always stored internally as UTC, along with the
/// quarter-hour offset the sending network reported (purely informational once decoded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    instant: DateTime<Utc>,
    quarter_hours: i8,
}

impl Timestamp {
    /// Builds a timestamp from an absolute instant plus the timezone offset to report on the
    /// wire, expressed in quarter-hours (e.g. `+4` for UTC+01:00).
    pub fn new(instant: DateTime<Utc>, quarter_hours: i8) -> Self {
        Timestamp { instant, quarter_hours }
    }

    /// The stored instant in UTC.
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Renders the instant in the timezone this timestamp's offset describes.
    pub fn in_reported_zone(&self) -> DateTime<FixedOffset> {
        let seconds = self.quarter_hours as i32 * 15 * 60;
        let offset = FixedOffset::east_opt(seconds).unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
        self.instant.with_timezone(&offset)
    }

    /// Encodes this timestamp into its 7-byte wire form. The calendar fields on the wire are the
    /// local wall-clock reading in the reported zone, not the UTC instant itself.
    pub fn encode(&self) -> [u8; 7] {
        let local = self.in_reported_zone();
        let y = (local.year() % 100) as u8;
        let mo = local.month() as u8;
        let d = local.day() as u8;
        let h = local.hour() as u8;
        let mi = local.minute() as u8;
        let s = local.second() as u8;
        let calendar = encode_semi_octets(&[y, mo, d, h, mi, s]);
        let tz_byte = encode_quarter_hour_byte(self.quarter_hours);
        trace!("encoded timestamp for {:04}-{:02}-{:02}", 2000 + y as i32, mo, d);
        [calendar[0], calendar[1], calendar[2], calendar[3], calendar[4], calendar[5], tz_byte]
    }

    /// Decodes a timestamp from its 7-byte wire form. The calendar fields are local to the
    /// reported quarter-hour offset, so they're interpreted in that zone and then converted to
    /// the UTC instant this type stores.
    pub fn decode(bytes: &[u8]) -> PduResult<Self> {
        if bytes.len() != 7 {
            return Err(PduError::IncorrectSize("timestamp must be 7 bytes"));
        }
        let fields = decode_semi_octets(&bytes[..6]);
        let (year, month, day, hour, minute, second) =
            (fields[0], fields[1], fields[2], fields[3], fields[4], fields[5]);
        let quarter_hours = decode_quarter_hour_byte(bytes[6]);
        let full_year = 2000 + year as i32;
        let naive = chrono::NaiveDate::from_ymd_opt(full_year, month as u32, day as u32)
            .and_then(|d| d.and_hms_opt(hour as u32, minute as u32, second as u32))
            .ok_or(PduError::ValueOutOfRange("timestamp calendar field", bytes[0]))?;
        let seconds = quarter_hours as i32 * 15 * 60;
        let offset = FixedOffset::east_opt(seconds)
            .ok_or(PduError::ValueOutOfRange("timestamp quarter-hour offset", bytes[6]))?;
        let instant = offset
            .from_local_datetime(&naive)
            .single()
            .ok_or(PduError::ValueOutOfRange("timestamp calendar field", bytes[0]))?
            .with_timezone(&Utc);
        Ok(Timestamp { instant, quarter_hours })
    }
}

fn encode_quarter_hour_byte(quarter_hours: i8) -> u8 {
    let negative = quarter_hours < 0;
    let magnitude = quarter_hours.unsigned_abs();
    let tens = magnitude / 10;
    let units = magnitude % 10;
    let low = tens | if negative { 0x08 } else { 0x00 };
    low | (units << 4)
}

fn decode_quarter_hour_byte(byte: u8) -> i8 {
    let low = byte & 0x0F;
    let units = (byte >> 4) & 0x0F;
    let negative = low & 0x08 != 0;
    let tens = low & 0x07;
    let magnitude = (tens * 10 + units) as i8;
    if negative { -magnitude } else { magnitude }
}
