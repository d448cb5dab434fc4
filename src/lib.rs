//! Telephone call charge engine
//!
//! This crate computes what a telephone call costs from its start and end
//! timestamps. Calls that cross a daylight-saving transition are billed for
//! the time that really elapsed, and the billed minutes are priced with a
//! two-tier per-minute tariff.
//!
//! # Example
//!
//! ```
//! use call_charge::calculation::charge;
//!
//! // 25 minutes: 1.00 for the first 20, then 0.10 per minute.
//! let amount = charge("2023-01-01 00:00:00", "2023-01-01 00:25:00", false)?;
//! assert!((amount - 1.50).abs() < 0.01);
//! # Ok::<(), call_charge::error::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod vectors;
