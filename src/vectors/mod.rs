//! Test-vector driver.
//!
//! Loads tables of `(start, end, is_transform, expected)` rows from YAML and
//! checks a [`ChargeCalculator`](crate::calculation::ChargeCalculator)
//! against them, allowing a small numeric tolerance on amounts.

mod runner;
mod table;

pub use runner::{
    Actual, DEFAULT_TOLERANCE, VectorOutcome, VectorReport, run_table, run_vector,
};
pub use table::{Expectation, TestVector, VectorTable};
