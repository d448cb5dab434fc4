//! Error types for the call charge engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while pricing a call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for the call charge engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use call_charge::error::EngineError;
///
/// let error = EngineError::InvalidDateError {
///     message: "month 13 is out of range".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid date: month 13 is out of range");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A timestamp string did not match the `yyyy-MM-dd HH:mm:ss` pattern.
    #[error("Timestamp '{input}' does not match yyyy-MM-dd HH:mm:ss: {message}")]
    FormatError {
        /// The text that failed to parse.
        input: String,
        /// A description of where the text deviates from the pattern.
        message: String,
    },

    /// A parsed timestamp was out of range, or the call interval was out of order.
    #[error("Invalid date: {message}")]
    InvalidDateError {
        /// A description of what made the date invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// Coarse classification of an [`EngineError`].
///
/// Used where an expected failure has to be written down as data, such as
/// in test-vector tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`EngineError::FormatError`].
    Format,
    /// See [`EngineError::InvalidDateError`].
    InvalidDate,
    /// Either configuration variant.
    Config,
    /// See [`EngineError::CalculationError`].
    Calculation,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Format => write!(f, "format"),
            ErrorKind::InvalidDate => write!(f, "invalid_date"),
            ErrorKind::Config => write!(f, "config"),
            ErrorKind::Calculation => write!(f, "calculation"),
        }
    }
}

impl EngineError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::FormatError { .. } => ErrorKind::Format,
            EngineError::InvalidDateError { .. } => ErrorKind::InvalidDate,
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ErrorKind::Config
            }
            EngineError::CalculationError { .. } => ErrorKind::Calculation,
        }
    }

    pub(crate) fn invalid_date(message: impl Into<String>) -> Self {
        EngineError::InvalidDateError {
            message: message.into(),
        }
    }

    pub(crate) fn calculation(message: impl Into<String>) -> Self {
        EngineError::CalculationError {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
