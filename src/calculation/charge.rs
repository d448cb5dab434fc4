//! Charge calculation.
//!
//! This module wires the pipeline together: parse both timestamps, validate
//! them, take the raw duration, correct it for DST, round up to whole
//! minutes and price the result.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::TariffConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditTrace, CallInterval, ChargeResult, MILLIS_PER_MINUTE};

use super::dst::{dst_adjustment, dst_window};
use super::parsing::parse_timestamp;
use super::pricing::cost_with_tiers;
use super::validation::validate_interval;

/// The version recorded on every [`ChargeResult`].
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rounds an adjusted duration up to whole billed minutes.
///
/// Exact multiples of a minute bill at that many minutes; any remainder adds
/// one more minute.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDateError`] if `total_ms` is negative, which
/// only happens when a transform call's end still precedes its start after
/// the DST correction.
///
/// # Example
///
/// ```
/// use call_charge::calculation::billed_minutes;
///
/// assert_eq!(billed_minutes(0).unwrap(), 0);
/// assert_eq!(billed_minutes(1).unwrap(), 1);
/// assert_eq!(billed_minutes(60_000).unwrap(), 1);
/// assert_eq!(billed_minutes(60_001).unwrap(), 2);
/// assert!(billed_minutes(-1).is_err());
/// ```
pub fn billed_minutes(total_ms: i64) -> EngineResult<u64> {
    let total = u64::try_from(total_ms).map_err(|_| {
        EngineError::invalid_date(format!(
            "adjusted call duration {} ms is negative",
            total_ms
        ))
    })?;
    Ok(total.div_ceil(MILLIS_PER_MINUTE as u64))
}

/// Prices calls against a tariff.
///
/// The calculator holds only the immutable tariff; the transform flag is an
/// argument of every call, so one calculator can be shared across threads.
///
/// # Example
///
/// ```
/// use call_charge::calculation::ChargeCalculator;
///
/// let calculator = ChargeCalculator::default();
///
/// let amount = calculator
///     .charge("2023-01-01 00:00:00", "2023-01-01 00:25:00", false)
///     .unwrap();
/// assert!((amount - 1.50).abs() < 1e-9);
///
/// let result = calculator
///     .calculate("2023-04-02 01:30:00", "2023-04-02 03:30:00", false)
///     .unwrap();
/// assert_eq!(result.billed_minutes, 60);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChargeCalculator {
    config: TariffConfig,
}

impl ChargeCalculator {
    /// Creates a calculator for the given tariff.
    pub fn new(config: TariffConfig) -> Self {
        Self { config }
    }

    /// Returns the tariff in use.
    pub fn config(&self) -> &TariffConfig {
        &self.config
    }

    /// Computes the amount owed for a call.
    ///
    /// # Errors
    ///
    /// - [`EngineError::FormatError`] if either text is not `yyyy-MM-dd HH:mm:ss`.
    /// - [`EngineError::InvalidDateError`] if either timestamp is out of range,
    ///   or the call ends before it starts without `is_transform`.
    pub fn charge(&self, start_text: &str, end_text: &str, is_transform: bool) -> EngineResult<f64> {
        let result = self.calculate(start_text, end_text, is_transform)?;
        result.amount.to_f64().ok_or_else(|| {
            EngineError::calculation(format!("amount {} is not representable as f64", result.amount))
        })
    }

    /// Computes the full breakdown for a call given as text.
    ///
    /// Fails exactly as [`charge`](Self::charge) does.
    pub fn calculate(
        &self,
        start_text: &str,
        end_text: &str,
        is_transform: bool,
    ) -> EngineResult<ChargeResult> {
        let interval = parse_interval(start_text, end_text, is_transform)?;
        self.calculate_interval(interval)
    }

    /// Computes the full breakdown for an already parsed call.
    pub fn calculate_interval(&self, interval: CallInterval) -> EngineResult<ChargeResult> {
        let started = Instant::now();
        let calculation_id = Uuid::new_v4();
        debug!(
            calculation_id = %calculation_id,
            start = %interval.start,
            end = %interval.end,
            is_transform = interval.is_transform,
            "Pricing call"
        );

        let (start_ms, end_ms) = validate_interval(&interval)?;
        let mut steps = Vec::new();

        let raw_duration_ms = end_ms - start_ms;
        steps.push(AuditStep {
            step_number: 1,
            rule_id: "raw_duration".to_string(),
            rule_name: "Raw Duration".to_string(),
            input: serde_json::json!({
                "start": interval.start.to_string(),
                "end": interval.end.to_string()
            }),
            output: serde_json::json!({ "raw_duration_ms": raw_duration_ms }),
            reasoning: format!(
                "Wall-clock difference from {} to {} is {} ms",
                interval.start, interval.end, raw_duration_ms
            ),
        });

        let window = dst_window(interval.start.year)?;
        let adjustment = dst_adjustment(start_ms, end_ms, &window, interval.is_transform);
        let adjusted_duration_ms = raw_duration_ms + adjustment.millis();
        steps.push(AuditStep {
            step_number: 2,
            rule_id: "dst_adjustment".to_string(),
            rule_name: "Daylight Saving Adjustment".to_string(),
            input: serde_json::json!({
                "spring_forward": window.spring_forward.to_string(),
                "fall_back": window.fall_back.to_string(),
                "is_transform": interval.is_transform
            }),
            output: serde_json::json!({
                "adjustment": adjustment,
                "adjustment_ms": adjustment.millis(),
                "adjusted_duration_ms": adjusted_duration_ms
            }),
            reasoning: format!(
                "{} adjustment of {} ms using the {} transitions ({} and {})",
                adjustment,
                adjustment.millis(),
                window.year,
                window.spring_forward,
                window.fall_back
            ),
        });

        let minutes = billed_minutes(adjusted_duration_ms).inspect_err(|err| {
            warn!(calculation_id = %calculation_id, error = %err, "Call rejected");
        })?;
        steps.push(AuditStep {
            step_number: 3,
            rule_id: "billed_minutes".to_string(),
            rule_name: "Round Up To Minutes".to_string(),
            input: serde_json::json!({ "adjusted_duration_ms": adjusted_duration_ms }),
            output: serde_json::json!({ "billed_minutes": minutes }),
            reasoning: format!(
                "{} ms rounded up to {} whole minutes",
                adjusted_duration_ms, minutes
            ),
        });

        let tiers = self.config.pricing();
        let amount = cost_with_tiers(minutes, tiers);
        let reasoning = if minutes <= tiers.threshold_minutes {
            format!(
                "{} minutes × ${} = ${}",
                minutes,
                tiers.base_rate_per_minute.normalize(),
                amount.normalize()
            )
        } else {
            format!(
                "${} for the first {} minutes + {} minutes × ${} = ${}",
                tiers.threshold_amount().normalize(),
                tiers.threshold_minutes,
                minutes - tiers.threshold_minutes,
                tiers.overflow_rate_per_minute.normalize(),
                amount.normalize()
            )
        };
        steps.push(AuditStep {
            step_number: 4,
            rule_id: "tiered_pricing".to_string(),
            rule_name: "Tiered Pricing".to_string(),
            input: serde_json::json!({
                "billed_minutes": minutes,
                "threshold_minutes": tiers.threshold_minutes,
                "base_rate": tiers.base_rate_per_minute.normalize().to_string(),
                "overflow_rate": tiers.overflow_rate_per_minute.normalize().to_string()
            }),
            output: serde_json::json!({ "amount": amount.normalize().to_string() }),
            reasoning,
        });

        let duration_us = started.elapsed().as_micros() as u64;
        info!(
            calculation_id = %calculation_id,
            billed_minutes = minutes,
            amount = %amount,
            dst_adjustment = %adjustment,
            duration_us = duration_us,
            "Charge calculated"
        );

        Ok(ChargeResult {
            calculation_id,
            timestamp: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            interval,
            dst_window: window,
            raw_duration_ms,
            dst_adjustment: adjustment,
            adjusted_duration_ms,
            billed_minutes: minutes,
            amount,
            audit_trace: AuditTrace { steps, duration_us },
        })
    }
}

/// Parses both ends of a call.
///
/// # Errors
///
/// Returns the [`EngineError::FormatError`] of the first text that fails.
pub fn parse_interval(start_text: &str, end_text: &str, is_transform: bool) -> EngineResult<CallInterval> {
    let parse = |text: &str| {
        parse_timestamp(text).inspect_err(|err| {
            warn!(input = %text, error = %err, "Timestamp rejected");
        })
    };
    Ok(CallInterval::new(parse(start_text)?, parse(end_text)?, is_transform))
}

/// Computes the amount owed for a call with the reference tariff.
///
/// Shorthand for `ChargeCalculator::default().charge(..)`.
///
/// # Example
///
/// ```
/// use call_charge::calculation::charge;
///
/// let amount = charge("2023-01-01 00:00:00", "2023-01-01 00:10:00", false).unwrap();
/// assert!((amount - 0.50).abs() < 1e-9);
///
/// assert!(charge("2023-13-01 00:00:00", "2023-01-01 00:10:00", false).is_err());
/// ```
pub fn charge(start_text: &str, end_text: &str, is_transform: bool) -> EngineResult<f64> {
    ChargeCalculator::default().charge(start_text, end_text, is_transform)
}
