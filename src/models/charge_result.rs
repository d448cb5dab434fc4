//! Charge result models for the call charge engine.
//!
//! This module contains the [`ChargeResult`] type and its audit structures,
//! which capture every intermediate value of a single charge calculation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CallInterval, DstAdjustment, DstWindow};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one stage of
/// the charge pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// Machine-readable identifier of the stage, e.g. `"dst_adjustment"`.
    pub rule_id: String,
    /// The human-readable name of the stage.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use call_charge::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     duration_us: 12,
/// };
/// assert!(trace.step("dst_adjustment").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Finds the step recorded under `rule_id`.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|step| step.rule_id == rule_id)
    }
}

/// The complete result of pricing one call.
///
/// `amount` is exact; [`ChargeCalculator::charge`](crate::calculation::ChargeCalculator::charge)
/// hands it to callers as `f64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The call that was priced.
    pub interval: CallInterval,
    /// The transition boundaries of the start timestamp's year.
    pub dst_window: DstWindow,
    /// `end - start` in milliseconds before DST correction.
    pub raw_duration_ms: i64,
    /// The DST correction that was applied.
    pub dst_adjustment: DstAdjustment,
    /// Raw duration plus the DST correction.
    pub adjusted_duration_ms: i64,
    /// Adjusted duration rounded up to whole minutes.
    pub billed_minutes: u64,
    /// The monetary amount owed for the call.
    pub amount: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Timestamp;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_step(rule_id: &str) -> AuditStep {
        AuditStep {
            step_number: 1,
            rule_id: rule_id.to_string(),
            rule_name: "Sample".to_string(),
            input: serde_json::json!({ "minutes": 10 }),
            output: serde_json::json!({ "amount": "0.50" }),
            reasoning: "10 minutes × $0.05 = $0.50".to_string(),
        }
    }

    fn sample_result() -> ChargeResult {
        let spring_forward = Timestamp::new(2023, 4, 2, 2, 0, 0);
        let fall_back = Timestamp::new(2023, 10, 29, 2, 0, 0);
        ChargeResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            interval: CallInterval::new(
                Timestamp::new(2023, 1, 1, 0, 0, 0),
                Timestamp::new(2023, 1, 1, 0, 10, 0),
                false,
            ),
            dst_window: DstWindow {
                year: 2023,
                spring_forward,
                fall_back,
                spring_start_ms: spring_forward.instant_millis().unwrap(),
                fall_start_ms: fall_back.instant_millis().unwrap(),
            },
            raw_duration_ms: 600_000,
            dst_adjustment: DstAdjustment::None,
            adjusted_duration_ms: 600_000,
            billed_minutes: 10,
            amount: dec("0.50"),
            audit_trace: AuditTrace {
                steps: vec![sample_step("tiered_pricing")],
                duration_us: 5,
            },
        }
    }

    #[test]
    fn test_trace_finds_step_by_rule_id() {
        let trace = AuditTrace {
            steps: vec![sample_step("raw_duration"), sample_step("tiered_pricing")],
            duration_us: 0,
        };
        assert!(trace.step("tiered_pricing").is_some());
        assert!(trace.step("unknown").is_none());
    }

    #[test]
    fn test_charge_result_serialization() {
        let json = serde_json::to_value(sample_result()).unwrap();

        assert_eq!(json["amount"], "0.50");
        assert_eq!(json["billed_minutes"], 10);
        assert_eq!(json["dst_adjustment"], "none");
        assert_eq!(json["interval"]["start"], "2023-01-01 00:00:00");
        assert_eq!(json["dst_window"]["fall_back"], "2023-10-29 02:00:00");
        assert_eq!(json["audit_trace"]["steps"][0]["rule_id"], "tiered_pricing");
    }

    #[test]
    fn test_charge_result_round_trips_through_json() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let back: ChargeResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
