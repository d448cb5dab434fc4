//! Core data models for the call charge engine.
//!
//! This module contains all the domain models used throughout the engine.

mod call_interval;
mod charge_result;
mod dst_window;
mod timestamp;

pub use call_interval::CallInterval;
pub use charge_result::{AuditStep, AuditTrace, ChargeResult};
pub use dst_window::{DstAdjustment, DstWindow, MILLIS_PER_HOUR, MILLIS_PER_SECOND};
pub use timestamp::{MILLIS_PER_MINUTE, Timestamp};
