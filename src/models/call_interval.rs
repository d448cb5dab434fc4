//! Call interval model.

use serde::{Deserialize, Serialize};

use super::Timestamp;

/// The start and end of a single call, plus the caller's transform flag.
///
/// `is_transform` states that the call is expected to span the autumn
/// fall-back transition. It enables the repeated-hour adjustment and lets
/// the end appear earlier than the start on the wall clock.
///
/// # Example
///
/// ```
/// use call_charge::models::{CallInterval, Timestamp};
///
/// let interval = CallInterval::new(
///     Timestamp::new(2023, 1, 1, 0, 0, 0),
///     Timestamp::new(2023, 1, 1, 0, 10, 0),
///     false,
/// );
/// assert_eq!(interval.raw_duration_millis(), Some(600_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallInterval {
    /// When the call started.
    pub start: Timestamp,
    /// When the call ended.
    pub end: Timestamp,
    /// Whether the call is expected to span the fall-back transition.
    pub is_transform: bool,
}

impl CallInterval {
    /// Creates a new call interval.
    pub const fn new(start: Timestamp, end: Timestamp, is_transform: bool) -> Self {
        Self {
            start,
            end,
            is_transform,
        }
    }

    /// Returns `end - start` in milliseconds, before any DST correction.
    ///
    /// `None` if either endpoint has no instant.
    pub fn raw_duration_millis(&self) -> Option<i64> {
        Some(self.end.instant_millis()? - self.start.instant_millis()?)
    }
}
