//! Timestamp model.
//!
//! This module defines the [`Timestamp`] value parsed from the fixed
//! `yyyy-MM-dd HH:mm:ss` text form, together with its derived instant.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of milliseconds in one minute.
pub const MILLIS_PER_MINUTE: i64 = 60_000;

/// A wall-clock timestamp with no timezone attached.
///
/// The fields hold exactly what was written in the source text, so a
/// `Timestamp` may describe an impossible date (month 13, February 30)
/// until it has been checked with
/// [`is_valid_timestamp`](crate::calculation::is_valid_timestamp).
///
/// # Example
///
/// ```
/// use call_charge::models::Timestamp;
///
/// let ts = Timestamp::new(2023, 4, 2, 1, 30, 0);
/// assert_eq!(ts.to_string(), "2023-04-02 01:30:00");
/// assert!(ts.instant_millis().is_some());
///
/// let bogus = Timestamp::new(2023, 2, 30, 0, 0, 0);
/// assert!(bogus.instant_millis().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    /// Calendar year.
    pub year: i32,
    /// Month of the year, 1-based.
    pub month: u32,
    /// Day of the month, 1-based.
    pub day: u32,
    /// Hour of the day.
    pub hour: u32,
    /// Minute of the hour.
    pub minute: u32,
    /// Second of the minute.
    pub second: u32,
}

impl Timestamp {
    /// Creates a timestamp from its raw fields. No range checks are made.
    pub const fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Returns the calendar date, or `None` if the fields do not name a real day.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Returns the date and time, or `None` if any field is out of range.
    pub fn to_naive_datetime(&self) -> Option<NaiveDateTime> {
        self.date()?.and_hms_opt(self.hour, self.minute, self.second)
    }

    /// Returns the absolute instant in milliseconds since the Unix epoch.
    ///
    /// The wall-clock fields are read at a fixed zero offset. The offset never
    /// shifts, so subtracting two instants yields the plain wall-clock
    /// difference; daylight-saving corrections are applied separately by
    /// [`dst_adjustment`](crate::calculation::dst_adjustment).
    pub fn instant_millis(&self) -> Option<i64> {
        self.to_naive_datetime()
            .map(|datetime| datetime.and_utc().timestamp_millis())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
