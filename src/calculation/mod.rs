//! Calculation logic for the call charge engine.
//!
//! This module contains the pure functions of the pricing pipeline:
//! timestamp parsing, calendar validation, daylight-saving transition
//! detection, tiered per-minute pricing, and the [`ChargeCalculator`] that
//! orchestrates them.

mod charge;
mod dst;
mod parsing;
mod pricing;
mod validation;

pub use charge::{ChargeCalculator, ENGINE_VERSION, billed_minutes, charge, parse_interval};
pub use dst::{
    FALL_BACK_MONTH, SPRING_FORWARD_MONTH, TRANSITION_HOUR, day_of_week, dst_adjustment,
    dst_window, nth_sunday,
};
pub use parsing::{TIMESTAMP_PATTERN, parse_timestamp};
pub use pricing::{cost, cost_with_tiers};
pub use validation::{
    days_in_month, is_leap_year, is_valid_timestamp, validate_interval, validate_timestamp,
};
