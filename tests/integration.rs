//! Integration tests for the call charge engine.
//!
//! This test suite drives the public API end to end:
//! - Plain calls priced in both tiers
//! - Spring-forward and fall-back transitions
//! - The transform flag
//! - Error cases (format and invalid date)
//! - Tariff configuration loaded from disk
//! - The weak and strong equivalence-class vector tables

use rust_decimal::Decimal;
use std::str::FromStr;

use call_charge::calculation::{ChargeCalculator, charge};
use call_charge::config::ConfigLoader;
use call_charge::error::{EngineError, ErrorKind};
use call_charge::models::DstAdjustment;
use call_charge::vectors::{DEFAULT_TOLERANCE, VectorReport, VectorTable, run_table};

// =============================================================================
// Test Helpers
// =============================================================================

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn create_calculator() -> ChargeCalculator {
    let loader = ConfigLoader::load("./config/standard").expect("Failed to load config");
    ChargeCalculator::new(loader.into_config())
}

fn assert_amount_approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= DEFAULT_TOLERANCE,
        "Expected amount {}, got {}",
        expected,
        actual
    );
}

fn run_fixture(name: &str) -> VectorReport {
    let table = VectorTable::load(format!("./tests/fixtures/{}.yaml", name))
        .expect("Failed to load vector table");
    run_table(&create_calculator(), &table, DEFAULT_TOLERANCE)
}

fn assert_report_passes(report: &VectorReport) {
    let failures: Vec<String> = report
        .failures()
        .map(|o| format!("{}: expected {}, got {:?}", o.id, o.expected, o.actual))
        .collect();
    assert!(
        failures.is_empty(),
        "Table '{}' had failures:\n{}",
        report.table,
        failures.join("\n")
    );
}

// =============================================================================
// Plain calls
// =============================================================================

#[test]
fn test_ten_minute_call_costs_fifty_cents() {
    let amount = charge("2023-01-01 00:00:00", "2023-01-01 00:10:00", false).unwrap();
    assert_amount_approx(amount, 0.50);
}

#[test]
fn test_twenty_five_minute_call() {
    let amount = charge("2023-01-01 00:00:00", "2023-01-01 00:25:00", false).unwrap();
    assert_amount_approx(amount, 1.50);
}

#[test]
fn test_long_call_over_midnight() {
    let result = create_calculator()
        .calculate("2023-07-14 23:30:00", "2023-07-15 01:00:00", false)
        .unwrap();
    assert_eq!(result.billed_minutes, 90);
    assert_eq!(result.amount, decimal("8.00"));
}

// =============================================================================
// DST transitions
// =============================================================================

#[test]
fn test_spring_forward_bills_sixty_fewer_minutes() {
    let calculator = create_calculator();
    let across = calculator
        .calculate("2023-04-02 01:59:59", "2023-04-02 03:00:01", false)
        .unwrap();
    // Same wall-clock length, one week later.
    let plain = calculator
        .calculate("2023-04-09 01:59:59", "2023-04-09 03:00:01", false)
        .unwrap();

    assert_eq!(across.dst_adjustment, DstAdjustment::SpringForward);
    assert_eq!(plain.dst_adjustment, DstAdjustment::None);
    assert_eq!(plain.billed_minutes - across.billed_minutes, 60);
}

#[test]
fn test_fall_back_with_and_without_transform() {
    let calculator = create_calculator();
    let with_flag = calculator
        .charge("2023-10-29 01:30:00", "2023-10-29 02:30:00", true)
        .unwrap();
    let without_flag = calculator
        .charge("2023-10-29 01:30:00", "2023-10-29 02:30:00", false)
        .unwrap();

    assert_amount_approx(with_flag, 11.00);
    assert_amount_approx(without_flag, 5.00);
}

#[test]
fn test_transform_flag_has_no_effect_away_from_fall_back() {
    let calculator = create_calculator();
    for (start, end) in [
        ("2023-01-01 00:00:00", "2023-01-01 00:10:00"),
        ("2023-04-02 01:00:00", "2023-04-02 04:00:00"),
        ("2023-10-28 01:30:00", "2023-10-28 02:30:00"),
    ] {
        assert_eq!(
            calculator.charge(start, end, true).unwrap(),
            calculator.charge(start, end, false).unwrap(),
            "{} -> {}",
            start,
            end
        );
    }
}

#[test]
fn test_call_into_next_year_ignores_next_years_rules() {
    // Crosses the new year; only 2023's transitions are consulted.
    let result = create_calculator()
        .calculate("2023-12-31 23:00:00", "2024-01-01 01:00:00", true)
        .unwrap();
    assert_eq!(result.dst_window.year, 2023);
    assert_eq!(result.dst_adjustment, DstAdjustment::None);
    assert_eq!(result.billed_minutes, 120);
}

// =============================================================================
// Error cases
// =============================================================================

#[test]
fn test_month_thirteen_is_invalid_date() {
    let err = charge("2023-13-01 00:00:00", "2023-01-01 00:10:00", false).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDate);
}

#[test]
fn test_end_before_start_is_invalid_date() {
    let err = charge("2023-01-02 00:00:00", "2023-01-01 00:00:00", false).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDate);
}

#[test]
fn test_malformed_timestamp_is_format_error() {
    let err = charge("2023-01-01T00:00:00", "2023-01-01 00:10:00", false).unwrap_err();
    match err {
        EngineError::FormatError { input, message } => {
            assert_eq!(input, "2023-01-01T00:00:00");
            assert!(message.contains("position 10"), "{}", message);
        }
        other => panic!("Expected FormatError, got {:?}", other),
    }
}

#[test]
fn test_february_twenty_ninth_only_in_leap_years() {
    assert!(charge("2024-02-29 10:00:00", "2024-02-29 10:05:00", false).is_ok());
    assert_eq!(
        charge("2023-02-29 10:00:00", "2023-02-29 10:05:00", false)
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidDate
    );
}

// =============================================================================
// Result serialization
// =============================================================================

#[test]
fn test_charge_result_serializes_for_audit() {
    let result = create_calculator()
        .calculate("2023-10-29 01:30:00", "2023-10-29 02:30:00", true)
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["dst_adjustment"], "fall_back");
    assert_eq!(json["billed_minutes"], 120);
    assert_eq!(json["dst_window"]["fall_back"], "2023-10-29 02:00:00");
    assert_eq!(json["audit_trace"]["steps"].as_array().unwrap().len(), 4);
    assert_eq!(
        json["audit_trace"]["steps"][1]["output"]["adjustment_ms"],
        3_600_000
    );
}

// =============================================================================
// Vector tables
// =============================================================================

#[test]
fn test_weak_equivalence_classes() {
    let report = run_fixture("weak_equivalence");
    assert_eq!(report.outcomes.len(), 9);
    assert_report_passes(&report);
}

#[test]
fn test_strong_equivalence_classes() {
    let report = run_fixture("strong_equivalence");
    assert_eq!(report.outcomes.len(), 22);
    assert_report_passes(&report);
}
