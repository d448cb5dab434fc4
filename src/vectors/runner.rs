//! Evaluation of test-vector tables against a calculator.

use serde::Serialize;
use tracing::{info, warn};

use crate::calculation::ChargeCalculator;
use crate::error::ErrorKind;

use super::table::{Expectation, TestVector, VectorTable};

/// Largest absolute difference between an expected and an actual amount
/// that still counts as a match.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// What the calculator actually produced for a vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Actual {
    /// The charge succeeded with this amount.
    Amount(f64),
    /// The charge failed.
    Error {
        /// Kind of the error.
        kind: ErrorKind,
        /// Its display text.
        message: String,
    },
}

/// The result of evaluating one vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorOutcome {
    /// The vector's id.
    pub id: String,
    /// What the table expected.
    pub expected: Expectation,
    /// What the calculator produced.
    pub actual: Actual,
    /// Whether the two agree.
    pub passed: bool,
}

/// The results of evaluating a whole table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorReport {
    /// Name of the table.
    pub table: String,
    /// One outcome per vector, in table order.
    pub outcomes: Vec<VectorOutcome>,
}

impl VectorReport {
    /// Number of vectors that matched.
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    /// Number of vectors that did not match.
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.passed_count()
    }

    /// Whether every vector matched.
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    /// The outcomes that did not match.
    pub fn failures(&self) -> impl Iterator<Item = &VectorOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}

/// Evaluates a single vector.
pub fn run_vector(calculator: &ChargeCalculator, vector: &TestVector, tolerance: f64) -> VectorOutcome {
    let actual = match calculator.charge(&vector.start, &vector.end, vector.is_transform) {
        Ok(amount) => Actual::Amount(amount),
        Err(err) => Actual::Error {
            kind: err.kind(),
            message: err.to_string(),
        },
    };

    let passed = match (&vector.expected, &actual) {
        (Expectation::Amount(expected), Actual::Amount(amount)) => {
            (expected - amount).abs() <= tolerance
        }
        (Expectation::Error(expected), Actual::Error { kind, .. }) => expected == kind,
        _ => false,
    };

    VectorOutcome {
        id: vector.id.clone(),
        expected: vector.expected,
        actual,
        passed,
    }
}

/// Evaluates every vector of `table`, logging each mismatch.
///
/// # Example
///
/// ```
/// use call_charge::calculation::ChargeCalculator;
/// use call_charge::vectors::{DEFAULT_TOLERANCE, VectorTable, run_table};
///
/// let table = VectorTable::from_yaml_str(
///     r#"
/// name: smoke
/// vectors:
///   - id: S1
///     start: "2023-01-01 00:00:00"
///     end: "2023-01-01 00:25:00"
///     expected: 1.50
/// "#,
///     "inline",
/// )?;
///
/// let report = run_table(&ChargeCalculator::default(), &table, DEFAULT_TOLERANCE);
/// assert!(report.all_passed());
/// # Ok::<(), call_charge::error::EngineError>(())
/// ```
pub fn run_table(calculator: &ChargeCalculator, table: &VectorTable, tolerance: f64) -> VectorReport {
    let outcomes: Vec<VectorOutcome> = table
        .vectors
        .iter()
        .map(|vector| run_vector(calculator, vector, tolerance))
        .collect();

    for outcome in outcomes.iter().filter(|o| !o.passed) {
        warn!(
            table = %table.name,
            id = %outcome.id,
            expected = %outcome.expected,
            actual = ?outcome.actual,
            "Test vector mismatch"
        );
    }

    let report = VectorReport {
        table: table.name.clone(),
        outcomes,
    };
    info!(
        table = %report.table,
        passed = report.passed_count(),
        failed = report.failed_count(),
        "Evaluated test vectors"
    );
    report
}
