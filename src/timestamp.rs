use std::fmt;

use serde::{
    de::{Deserialize, Deserializer, Error as DeError},
    ser::{Serialize, Serializer},
};

use crate::error::{Error, Result};

/// Largest distance from the Unix epoch, in milliseconds, that can be rendered as a date. This is
/// 100,000,000 days either way, the same range ECMAScript dates cover.
pub const MAX_DATE_MILLIS: i64 = 8_640_000_000_000_000;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// An attestation's expiry, in seconds since the Unix epoch.
///
/// Zero is a sentinel meaning the attestation never expires. With a human-readable serializer,
/// the value is written as a decimal string so that consumers parsing numbers as doubles don't
/// lose precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Expiry(i64);

impl Expiry {
    pub const NEVER: Expiry = Expiry(0);

    pub fn from_secs(secs: i64) -> Self {
        Expiry(secs)
    }

    pub fn secs(&self) -> i64 {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0 != 0
    }

    /// Render the expiry as an ISO-8601 UTC date, or `None` if it's the "never" sentinel. Fails
    /// if the date falls outside [`MAX_DATE_MILLIS`].
    pub fn to_iso8601(&self) -> Result<Option<String>> {
        if !self.is_set() {
            return Ok(None);
        }
        let millis = self
            .0
            .checked_mul(1000)
            .filter(|ms| ms.unsigned_abs() <= MAX_DATE_MILLIS as u64)
            .ok_or(Error::ExpiryOutOfRange(self.0))?;
        Ok(Some(iso8601_from_millis(millis)))
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Expiry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.collect_str(&self.0)
        } else {
            serializer.serialize_i64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Expiry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse::<i64>().map(Expiry).map_err(D::Error::custom)
        } else {
            i64::deserialize(deserializer).map(Expiry)
        }
    }
}

/// Format milliseconds since the Unix epoch as `YYYY-MM-DDTHH:MM:SS.mmmZ`. Years outside
/// 0..=9999 use the expanded `±YYYYYY` form. Callers must keep `millis` within
/// [`MAX_DATE_MILLIS`] for the expanded year to fit in six digits.
pub fn iso8601_from_millis(millis: i64) -> String {
    let days = millis.div_euclid(MILLIS_PER_DAY);
    let ms_of_day = millis.rem_euclid(MILLIS_PER_DAY);
    let (year, month, day) = civil_from_days(days);

    let hour = ms_of_day / 3_600_000;
    let minute = (ms_of_day / 60_000) % 60;
    let second = (ms_of_day / 1000) % 60;
    let milli = ms_of_day % 1000;

    let year = if (0..=9999).contains(&year) {
        format!("{:04}", year)
    } else if year < 0 {
        format!("-{:06}", -year)
    } else {
        format!("+{:06}", year)
    };
    format!(
        "{}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        year, month, day, hour, minute, second, milli
    )
}

/// Convert days since 1970-01-01 into a proleptic Gregorian (year, month, day).
/// Howard Hinnant's `civil_from_days`.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097; // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365; // [0, 399]
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + (month <= 2) as i64;
    (year, month, day)
}
