//! Daylight-saving window model.
//!
//! This module defines the yearly [`DstWindow`] and the [`DstAdjustment`]
//! a call interval earns by crossing one of its transitions.

use serde::{Deserialize, Serialize};

use super::Timestamp;

/// Number of milliseconds in one second.
pub const MILLIS_PER_SECOND: i64 = 1_000;

/// Number of milliseconds in one hour. Every transition shifts the clock by this much.
pub const MILLIS_PER_HOUR: i64 = 3_600_000;

/// The two transition boundaries of one year.
///
/// - `spring_forward` is 02:00 on the first Sunday of April. The wall-clock
///   hour `[02:00, 03:00)` that follows it never happens.
/// - `fall_back` is 02:00 on the last Sunday of October. The wall-clock hour
///   `[02:00, 02:59:59]` that follows it happens twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DstWindow {
    /// The year these boundaries belong to.
    pub year: i32,
    /// 02:00 on the first Sunday of April.
    pub spring_forward: Timestamp,
    /// 02:00 on the last Sunday of October.
    pub fall_back: Timestamp,
    /// Instant of `spring_forward` in milliseconds.
    pub spring_start_ms: i64,
    /// Instant of `fall_back` in milliseconds.
    pub fall_start_ms: i64,
}

impl DstWindow {
    /// End of the skipped spring hour (03:00).
    pub fn spring_end_ms(&self) -> i64 {
        self.spring_start_ms + MILLIS_PER_HOUR
    }

    /// Last second of the repeated autumn hour (02:59:59).
    pub fn fall_end_ms(&self) -> i64 {
        self.fall_start_ms + MILLIS_PER_HOUR - MILLIS_PER_SECOND
    }

    /// Whether `[start_ms, end_ms]` fully contains the skipped spring hour.
    pub fn contains_spring_gap(&self, start_ms: i64, end_ms: i64) -> bool {
        start_ms <= self.spring_start_ms && end_ms >= self.spring_end_ms()
    }

    /// Whether `[start_ms, end_ms]` touches the repeated autumn hour.
    ///
    /// True when the start lies inside the hour, the end lies inside the
    /// hour, or the interval covers the whole hour.
    pub fn overlaps_fall_repeat(&self, start_ms: i64, end_ms: i64) -> bool {
        let window = self.fall_start_ms..=self.fall_end_ms();
        window.contains(&start_ms)
            || window.contains(&end_ms)
            || (start_ms <= self.fall_start_ms && end_ms >= self.fall_end_ms())
    }
}

/// The correction applied to a call's raw duration for a DST transition.
///
/// # Example
///
/// ```
/// use call_charge::models::DstAdjustment;
///
/// assert_eq!(DstAdjustment::SpringForward.millis(), -3_600_000);
/// assert_eq!(DstAdjustment::FallBack.millis(), 3_600_000);
/// assert_eq!(DstAdjustment::None.millis(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstAdjustment {
    /// No transition was crossed.
    None,
    /// The call spanned the skipped spring hour; one hour less really elapsed.
    SpringForward,
    /// The call touched the repeated autumn hour; one hour more really elapsed.
    FallBack,
}

impl DstAdjustment {
    /// Signed correction in milliseconds, to be added to the raw duration.
    pub const fn millis(self) -> i64 {
        match self {
            DstAdjustment::None => 0,
            DstAdjustment::SpringForward => -MILLIS_PER_HOUR,
            DstAdjustment::FallBack => MILLIS_PER_HOUR,
        }
    }
}

impl std::fmt::Display for DstAdjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DstAdjustment::None => write!(f, "None"),
            DstAdjustment::SpringForward => write!(f, "SpringForward"),
            DstAdjustment::FallBack => write!(f, "FallBack"),
        }
    }
}
