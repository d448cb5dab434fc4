//! Daylight-saving transition detection.
//!
//! This module locates the yearly transition Sundays and decides how much a
//! call's raw duration has to be corrected for crossing them.
//!
//! ## Rule
//!
//! A single fixed rule is modelled:
//! - Clocks spring forward at 02:00 on the first Sunday of April (02:00 → 03:00).
//! - Clocks fall back at 02:00 on the last Sunday of October (03:00 → 02:00).
//!
//! Only the start timestamp's year is consulted, even when a call runs into
//! the next year.

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{DstAdjustment, DstWindow, Timestamp};

use super::validation::days_in_month;

/// Month in which clocks spring forward.
pub const SPRING_FORWARD_MONTH: u32 = 4;

/// Month in which clocks fall back.
pub const FALL_BACK_MONTH: u32 = 10;

/// Local hour at which both transitions happen.
pub const TRANSITION_HOUR: u32 = 2;

/// Returns the ISO day of the week (1 = Monday … 7 = Sunday) for a date.
///
/// Uses the Kim Larsson congruence, with January and February counted as
/// months 13 and 14 of the previous year. Valid for years from 1 onwards.
///
/// # Example
///
/// ```
/// use call_charge::calculation::day_of_week;
///
/// assert_eq!(day_of_week(2023, 4, 1), 6); // Saturday
/// assert_eq!(day_of_week(2023, 4, 2), 7); // Sunday
/// assert_eq!(day_of_week(2024, 1, 1), 1); // Monday
/// ```
pub fn day_of_week(year: i32, month: u32, day: u32) -> u32 {
    let (y, m) = if month <= 2 {
        (i64::from(year) - 1, i64::from(month) + 12)
    } else {
        (i64::from(year), i64::from(month))
    };
    let d = i64::from(day);

    let w = (d + 2 * m + 3 * (m + 1) / 5 + y + y / 4 - y / 100 + y / 400).rem_euclid(7) + 1;
    w as u32
}

/// Finds a Sunday near a date and returns it at 02:00:00.
///
/// If `want_first`, the first Sunday on or after `day`; otherwise the last
/// Sunday on or before `day`. When `day` is itself a Sunday it is returned
/// in both modes.
///
/// # Errors
///
/// - [`EngineError::InvalidDateError`] if `(year, month, day)` is not a real date.
/// - [`EngineError::CalculationError`] if the Sunday falls outside `month`.
///
/// # Example
///
/// ```
/// use call_charge::calculation::nth_sunday;
/// use call_charge::models::Timestamp;
///
/// // First Sunday of April 2023
/// let spring = nth_sunday(2023, 4, 1, true).unwrap();
/// assert_eq!(spring, Timestamp::new(2023, 4, 2, 2, 0, 0));
///
/// // Last Sunday of October 2023
/// let fall = nth_sunday(2023, 10, 31, false).unwrap();
/// assert_eq!(fall, Timestamp::new(2023, 10, 29, 2, 0, 0));
/// ```
pub fn nth_sunday(year: i32, month: u32, day: u32, want_first: bool) -> EngineResult<Timestamp> {
    if year <= 0 || !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return Err(EngineError::invalid_date(format!(
            "{:04}-{:02}-{:02} is not a date",
            year, month, day
        )));
    }

    let w = day_of_week(year, month, day);
    let sunday = if want_first {
        Some(day + (7 - w))
    } else {
        day.checked_sub(w % 7).filter(|d| *d > 0)
    };

    match sunday {
        Some(sunday) if sunday <= days_in_month(year, month) => {
            Ok(Timestamp::new(year, month, sunday, TRANSITION_HOUR, 0, 0))
        }
        _ => Err(EngineError::calculation(format!(
            "no Sunday {} {:04}-{:02}-{:02} within the month",
            if want_first { "on or after" } else { "on or before" },
            year,
            month,
            day
        ))),
    }
}

/// Computes the spring-forward and fall-back boundaries for `year`.
///
/// # Errors
///
/// Fails if `year` is not positive.
///
/// # Example
///
/// ```
/// use call_charge::calculation::dst_window;
///
/// let window = dst_window(2024).unwrap();
/// assert_eq!(window.spring_forward.to_string(), "2024-04-07 02:00:00");
/// assert_eq!(window.fall_back.to_string(), "2024-10-27 02:00:00");
/// ```
pub fn dst_window(year: i32) -> EngineResult<DstWindow> {
    let spring_forward = nth_sunday(year, SPRING_FORWARD_MONTH, 1, true)?;
    let fall_back = nth_sunday(
        year,
        FALL_BACK_MONTH,
        days_in_month(year, FALL_BACK_MONTH),
        false,
    )?;

    Ok(DstWindow {
        year,
        spring_forward,
        fall_back,
        spring_start_ms: boundary_instant(&spring_forward)?,
        fall_start_ms: boundary_instant(&fall_back)?,
    })
}

fn boundary_instant(boundary: &Timestamp) -> EngineResult<i64> {
    boundary
        .instant_millis()
        .ok_or_else(|| EngineError::calculation(format!("{} has no instant", boundary)))
}

/// Decides the DST correction for a call from `start_ms` to `end_ms`.
///
/// - Covering the whole skipped spring hour gives [`DstAdjustment::SpringForward`]
///   whatever the transform flag says.
/// - Otherwise, with `is_transform` set, touching the repeated autumn hour
///   gives [`DstAdjustment::FallBack`].
/// - Anything else gives [`DstAdjustment::None`].
///
/// # Example
///
/// ```
/// use call_charge::calculation::{dst_adjustment, dst_window};
/// use call_charge::models::{DstAdjustment, Timestamp};
///
/// let window = dst_window(2023).unwrap();
/// let start = Timestamp::new(2023, 4, 2, 1, 30, 0).instant_millis().unwrap();
/// let end = Timestamp::new(2023, 4, 2, 3, 30, 0).instant_millis().unwrap();
///
/// assert_eq!(dst_adjustment(start, end, &window, false), DstAdjustment::SpringForward);
/// ```
pub fn dst_adjustment(
    start_ms: i64,
    end_ms: i64,
    window: &DstWindow,
    is_transform: bool,
) -> DstAdjustment {
    let adjustment = if window.contains_spring_gap(start_ms, end_ms) {
        DstAdjustment::SpringForward
    } else if is_transform && window.overlaps_fall_repeat(start_ms, end_ms) {
        DstAdjustment::FallBack
    } else {
        DstAdjustment::None
    };

    if adjustment != DstAdjustment::None {
        debug!(
            year = window.year,
            adjustment = %adjustment,
            millis = adjustment.millis(),
            "DST adjustment applied"
        );
    }
    adjustment
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Weekday};
    use proptest::prelude::*;

    fn ms(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> i64 {
        Timestamp::new(year, month, day, hour, minute, second)
            .instant_millis()
            .unwrap()
    }

    #[test]
    fn test_known_transition_dates() {
        let cases = [
            (2018, 1, 28),
            (2021, 4, 31),
            (2023, 2, 29),
            (2024, 7, 27),
            (2027, 4, 31),
        ];
        for (year, april_day, october_day) in cases {
            let window = dst_window(year).unwrap();
            assert_eq!(
                window.spring_forward,
                Timestamp::new(year, 4, april_day, 2, 0, 0),
                "spring {}",
                year
            );
            assert_eq!(
                window.fall_back,
                Timestamp::new(year, 10, october_day, 2, 0, 0),
                "fall {}",
                year
            );
        }
    }

    #[test]
    fn test_last_sunday_when_day_is_sunday() {
        // October 31 2021 is itself a Sunday.
        let fall = nth_sunday(2021, 10, 31, false).unwrap();
        assert_eq!(fall.day, 31);
    }

    #[test]
    fn test_first_sunday_when_day_is_sunday() {
        // April 1 2018 is itself a Sunday.
        let spring = nth_sunday(2018, 4, 1, true).unwrap();
        assert_eq!(spring.day, 1);
    }

    #[test]
    fn test_nth_sunday_result_leaving_month_is_error() {
        // April 30 2023 is a Sunday, but April 29 2023 is a Saturday; the next
        // Sunday after it is still in April. April 30 2024 is a Tuesday, whose
        // next Sunday is in May.
        assert!(nth_sunday(2023, 4, 29, true).is_ok());
        assert!(matches!(
            nth_sunday(2024, 4, 30, true),
            Err(EngineError::CalculationError { .. })
        ));
        // October 1 2023 is a Sunday; October 2 2023 looks back to it.
        assert_eq!(nth_sunday(2023, 10, 2, false).unwrap().day, 1);
        // October 1 2024 is a Tuesday; the previous Sunday is in September.
        assert!(matches!(
            nth_sunday(2024, 10, 1, false),
            Err(EngineError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_nth_sunday_rejects_non_dates() {
        assert!(matches!(
            nth_sunday(2023, 4, 31, true),
            Err(EngineError::InvalidDateError { .. })
        ));
        assert!(matches!(
            nth_sunday(0, 4, 1, true),
            Err(EngineError::InvalidDateError { .. })
        ));
    }

    #[test]
    fn test_spring_adjustment_ignores_transform_flag() {
        let window = dst_window(2023).unwrap();
        let start = ms(2023, 4, 2, 1, 59, 59);
        let end = ms(2023, 4, 2, 3, 0, 1);
        assert_eq!(
            dst_adjustment(start, end, &window, false),
            DstAdjustment::SpringForward
        );
        assert_eq!(
            dst_adjustment(start, end, &window, true),
            DstAdjustment::SpringForward
        );
    }

    #[test]
    fn test_call_starting_inside_spring_gap_is_not_adjusted() {
        let window = dst_window(2023).unwrap();
        let start = ms(2023, 4, 2, 2, 30, 0);
        let end = ms(2023, 4, 2, 3, 30, 0);
        assert_eq!(dst_adjustment(start, end, &window, false), DstAdjustment::None);
    }

    #[test]
    fn test_fall_adjustment_requires_transform_flag() {
        let window = dst_window(2023).unwrap();
        let start = ms(2023, 10, 29, 1, 30, 0);
        let end = ms(2023, 10, 29, 2, 30, 0);
        assert_eq!(dst_adjustment(start, end, &window, false), DstAdjustment::None);
        assert_eq!(
            dst_adjustment(start, end, &window, true),
            DstAdjustment::FallBack
        );
    }

    #[test]
    fn test_fall_adjustment_with_reversed_endpoints() {
        let window = dst_window(2023).unwrap();
        let start = ms(2023, 10, 29, 2, 40, 0);
        let end = ms(2023, 10, 29, 2, 10, 0);
        assert_eq!(
            dst_adjustment(start, end, &window, true),
            DstAdjustment::FallBack
        );
    }

    #[test]
    fn test_window_of_other_year_is_ignored() {
        // Only the window passed in is consulted.
        let window = dst_window(2022).unwrap();
        let start = ms(2023, 4, 2, 1, 0, 0);
        let end = ms(2023, 4, 2, 4, 0, 0);
        assert_eq!(dst_adjustment(start, end, &window, false), DstAdjustment::None);
    }

    proptest! {
        #[test]
        fn day_of_week_matches_calendar(year in 1i32..=9999, month in 1u32..=12, day in 1u32..=28) {
            let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
            prop_assert_eq!(day_of_week(year, month, day), date.weekday().number_from_monday());
        }

        #[test]
        fn spring_forward_is_first_sunday_of_april(year in 1i32..=9999) {
            let spring = nth_sunday(year, 4, 1, true).unwrap();
            let date = spring.date().unwrap();
            prop_assert_eq!(date.weekday(), Weekday::Sun);
            prop_assert!((1..=7).contains(&spring.day));
            prop_assert_eq!(spring.hour, TRANSITION_HOUR);
        }

        #[test]
        fn fall_back_is_last_sunday_of_october(year in 1i32..=9999) {
            let fall = nth_sunday(year, 10, 31, false).unwrap();
            let date = fall.date().unwrap();
            prop_assert_eq!(date.weekday(), Weekday::Sun);
            prop_assert!((25..=31).contains(&fall.day));
            prop_assert_eq!(fall.hour, TRANSITION_HOUR);
        }
    }
}
