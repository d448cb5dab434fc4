//! Timestamp and call interval validation.
//!
//! Calendar arithmetic is kept as free functions over plain integers. Every
//! range check is an independent necessary condition: a timestamp is valid
//! only if all of them hold.

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{CallInterval, Timestamp};

/// Returns whether `year` is a Gregorian leap year.
///
/// # Example
///
/// ```
/// use call_charge::calculation::is_leap_year;
///
/// assert!(is_leap_year(2024));
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// assert!(!is_leap_year(2023));
/// ```
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in `month` of `year`.
///
/// `month` is expected in `1..=12`; any other value falls through to 30.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

/// Returns whether the fields of `timestamp` name a real clock time.
///
/// Requires `year > 0`, `1 <= month <= 12`, `1 <= day <= days_in_month`,
/// `hour <= 23`, `minute <= 59` and `second <= 59`.
///
/// # Example
///
/// ```
/// use call_charge::calculation::is_valid_timestamp;
/// use call_charge::models::Timestamp;
///
/// assert!(is_valid_timestamp(&Timestamp::new(2024, 2, 29, 23, 59, 59)));
/// assert!(!is_valid_timestamp(&Timestamp::new(2023, 2, 29, 0, 0, 0)));
/// assert!(!is_valid_timestamp(&Timestamp::new(2023, 1, 1, 24, 0, 0)));
/// ```
pub fn is_valid_timestamp(timestamp: &Timestamp) -> bool {
    invalid_reason(timestamp).is_none()
}

/// Describes the first field of `timestamp` that is out of range.
fn invalid_reason(timestamp: &Timestamp) -> Option<String> {
    let Timestamp {
        year,
        month,
        day,
        hour,
        minute,
        second,
    } = *timestamp;

    if year <= 0 {
        return Some(format!("year {} must be positive", year));
    }
    if !(1..=12).contains(&month) {
        return Some(format!("month {} is out of range 1-12", month));
    }
    let month_length = days_in_month(year, month);
    if !(1..=month_length).contains(&day) {
        return Some(format!(
            "day {} is out of range 1-{} for {:04}-{:02}",
            day, month_length, year, month
        ));
    }
    if hour > 23 {
        return Some(format!("hour {} is out of range 0-23", hour));
    }
    if minute > 59 {
        return Some(format!("minute {} is out of range 0-59", minute));
    }
    if second > 59 {
        return Some(format!("second {} is out of range 0-59", second));
    }
    None
}

/// Checks a single timestamp, naming the offending field on failure.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDateError`] if any field is out of range.
pub fn validate_timestamp(timestamp: &Timestamp) -> EngineResult<()> {
    match invalid_reason(timestamp) {
        None => Ok(()),
        Some(reason) => {
            warn!(timestamp = %timestamp, reason = %reason, "Timestamp rejected");
            Err(EngineError::invalid_date(format!("{}: {}", timestamp, reason)))
        }
    }
}

/// Checks both endpoints of a call and, unless a transform is expected,
/// their chronological order.
///
/// On success returns the start and end instants in milliseconds.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDateError`] if either endpoint is invalid,
/// or if `is_transform` is false and the start falls after the end.
pub fn validate_interval(interval: &CallInterval) -> EngineResult<(i64, i64)> {
    validate_timestamp(&interval.start)?;
    validate_timestamp(&interval.end)?;

    let start_ms = instant_of(&interval.start)?;
    let end_ms = instant_of(&interval.end)?;

    if !interval.is_transform && start_ms > end_ms {
        warn!(
            start = %interval.start,
            end = %interval.end,
            "Call ends before it starts"
        );
        return Err(EngineError::invalid_date(format!(
            "start {} is after end {}",
            interval.start, interval.end
        )));
    }

    Ok((start_ms, end_ms))
}

fn instant_of(timestamp: &Timestamp) -> EngineResult<i64> {
    timestamp
        .instant_millis()
        .ok_or_else(|| EngineError::invalid_date(format!("{} has no instant", timestamp)))
}
