//! Timestamp parsing.
//!
//! Accepts exactly `yyyy-MM-dd HH:mm:ss`: four year digits, two digits for
//! every other field, `-` and `:` separators and one space. Parsing only
//! checks shape; whether the fields form a real date is decided by
//! [`is_valid_timestamp`](super::is_valid_timestamp).

use std::str::FromStr;

use crate::error::{EngineError, EngineResult};
use crate::models::Timestamp;

/// The accepted timestamp layout, in the notation used by error messages.
pub const TIMESTAMP_PATTERN: &str = "yyyy-MM-dd HH:mm:ss";

/// Byte offsets of the separators in [`TIMESTAMP_PATTERN`].
const SEPARATORS: [(usize, u8); 5] = [(4, b'-'), (7, b'-'), (10, b' '), (13, b':'), (16, b':')];

/// Parses a timestamp from its fixed text form.
///
/// # Errors
///
/// Returns [`EngineError::FormatError`] if `text` does not match
/// `yyyy-MM-dd HH:mm:ss` literally.
///
/// # Example
///
/// ```
/// use call_charge::calculation::parse_timestamp;
///
/// let ts = parse_timestamp("2023-04-02 01:30:00").unwrap();
/// assert_eq!((ts.year, ts.month, ts.day), (2023, 4, 2));
/// assert_eq!((ts.hour, ts.minute, ts.second), (1, 30, 0));
///
/// // Well-formed but impossible dates still parse; validation rejects them later.
/// assert!(parse_timestamp("2023-13-01 00:00:00").is_ok());
/// assert!(parse_timestamp("2023-1-01 00:00:00").is_err());
/// ```
pub fn parse_timestamp(text: &str) -> EngineResult<Timestamp> {
    let bytes = text.as_bytes();
    if bytes.len() != TIMESTAMP_PATTERN.len() {
        return Err(format_error(
            text,
            format!(
                "expected {} characters, found {}",
                TIMESTAMP_PATTERN.len(),
                text.chars().count()
            ),
        ));
    }

    for (position, separator) in SEPARATORS {
        if bytes[position] != separator {
            return Err(format_error(
                text,
                format!("expected '{}' at position {}", separator as char, position),
            ));
        }
    }

    Ok(Timestamp {
        year: digits(text, 0, 4)? as i32,
        month: digits(text, 5, 2)?,
        day: digits(text, 8, 2)?,
        hour: digits(text, 11, 2)?,
        minute: digits(text, 14, 2)?,
        second: digits(text, 17, 2)?,
    })
}

/// Reads `len` ASCII digits starting at byte `start`.
fn digits(text: &str, start: usize, len: usize) -> EngineResult<u32> {
    text.as_bytes()[start..start + len]
        .iter()
        .enumerate()
        .try_fold(0u32, |acc, (offset, byte)| {
            if byte.is_ascii_digit() {
                Ok(acc * 10 + u32::from(byte - b'0'))
            } else {
                Err(format_error(
                    text,
                    format!("expected a digit at position {}", start + offset),
                ))
            }
        })
}

fn format_error(text: &str, message: String) -> EngineError {
    EngineError::FormatError {
        input: text.to_string(),
        message,
    }
}

impl FromStr for Timestamp {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_timestamp(s)
    }
}
