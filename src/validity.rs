//! The relative Validity Period octet: a piecewise lookup table trading duration precision for a
//! single byte, the only validity-period format this crate implements (see `PduError::NonRelativeUnsupported`).
use chrono::Duration;
use log::trace;

/// A relative validity period, stored internally at minute resolution to match the wire format's
/// coarsest bucket and rounded up on encode so the recipient never expires a message early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityPeriod {
    minutes: u32,
}

const FIVE_MIN_MAX_OCTET: u32 = 143;
const HALF_HOUR_MAX_OCTET: u32 = 167;
const DAY_MAX_OCTET: u32 = 196;

impl ValidityPeriod {
    /// Builds a validity period from a `chrono::Duration`, rounding up to the nearest
    /// representable bucket. Negative durations are treated as zero.
    pub fn from_duration(duration: Duration) -> Self {
        let minutes = duration.num_minutes().max(0) as u32;
        ValidityPeriod { minutes }
    }

    /// The canonical duration this period's bucket represents (lossy: encode then decode snaps
    /// to the bucket's boundary).
    pub fn duration(&self) -> Duration {
        Duration::minutes(self.minutes as i64)
    }

    /// Encodes this period into its relative-VP octet.
    pub fn to_octet(&self) -> u8 {
        let d = self.minutes;
        let n = if d <= 5 {
            0
        } else if d <= 720 {
            (d + 4) / 5 - 1
        } else if d <= 1440 {
            let x = d - 720;
            FIVE_MIN_MAX_OCTET + (x + 29) / 30
        } else if d <= 43_200 {
            166 + (d + 1439) / 1440
        } else if d <= 635_040 {
            192 + (d + 10_079) / 10_080
        } else {
            255
        };
        let octet = n.min(255) as u8;
        trace!("encoded validity period of {} minutes as octet {:#04x}", d, octet);
        octet
    }

    /// Decodes a relative-VP octet into its canonical bucket duration.
    pub fn from_octet(n: u8) -> Self {
        let n = n as u32;
        let minutes = if n <= FIVE_MIN_MAX_OCTET {
            (n + 1) * 5
        } else if n <= HALF_HOUR_MAX_OCTET {
            720 + (n - 143) * 30
        } else if n <= DAY_MAX_OCTET {
            (n - 166) * 1440
        } else {
            (n - 192) * 10_080
        };
        ValidityPeriod { minutes }
    }
}
