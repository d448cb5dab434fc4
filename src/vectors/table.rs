//! Test-vector tables.
//!
//! A table is a YAML document listing calls and what each should cost:
//!
//! ```yaml
//! name: weak equivalence classes
//! vectors:
//!   - id: W01
//!     start: "2023-01-01 00:00:00"
//!     end: "2023-01-01 00:10:00"
//!     is_transform: false
//!     expected: 0.50
//!   - id: W05
//!     start: "2023-13-01 00:00:00"
//!     end: "2023-01-01 00:10:00"
//!     expected: invalid_date
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult, ErrorKind};

/// What a test vector is expected to produce.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expectation {
    /// The call prices to this amount.
    Amount(f64),
    /// The call is rejected with this kind of error.
    Error(ErrorKind),
}

impl std::fmt::Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expectation::Amount(amount) => write!(f, "{:.2}", amount),
            Expectation::Error(kind) => write!(f, "error:{}", kind),
        }
    }
}

/// One row of a table: the inputs of a charge and its expected result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestVector {
    /// Identifier reported in outcomes.
    pub id: String,
    /// Start timestamp text, passed to the calculator untouched.
    pub start: String,
    /// End timestamp text, passed to the calculator untouched.
    pub end: String,
    /// The transform flag.
    #[serde(default)]
    pub is_transform: bool,
    /// The expected result.
    pub expected: Expectation,
}

/// A named list of test vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorTable {
    /// Name used in logs and reports.
    pub name: String,
    /// The rows of the table.
    pub vectors: Vec<TestVector>,
}

impl VectorTable {
    /// Loads a table from a YAML file.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if the file cannot be read.
    /// - [`EngineError::ConfigParseError`] if it is not a valid table.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses a table from YAML text; `origin` names the source in errors.
    pub fn from_yaml_str(yaml: &str, origin: &str) -> EngineResult<Self> {
        let table: Self = serde_yaml::from_str(yaml).map_err(|e| EngineError::ConfigParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        let duplicate = {
            let mut seen = HashSet::new();
            table
                .vectors
                .iter()
                .find(|v| !seen.insert(v.id.as_str()))
                .map(|v| v.id.clone())
        };
        if let Some(id) = duplicate {
            return Err(EngineError::ConfigParseError {
                path: origin.to_string(),
                message: format!("duplicate vector id '{}'", id),
            });
        }

        Ok(table)
    }
}
