//! Duration argument parsing.
//!
//! Accepts exactly `<digits><unit>` where unit is `s` or `m`.
//! Pure function, no I/O.

use std::time::Duration;

/// Seconds in one minute.
const SECS_PER_MINUTE: u64 = 60;

/// Error from parsing a duration argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// Not `<digits>s` or `<digits>m`.
    InvalidFormat { input: String },
}

/// Time unit recognised in the suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Seconds,
    Minutes,
}

/// Parse a duration such as `30s` or `5m`.
///
/// The numeric part must be one or more ASCII digits: no sign, no
/// whitespace, no fractional part. Compound forms (`1m30s`) and hours
/// are not supported.
///
/// # Errors
/// Returns `InvalidFormat` for any other shape, and for values that
/// overflow `u64` seconds.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let invalid = || DurationError::InvalidFormat {
        input: input.to_string(),
    };

    let (digits, unit) = split_unit(input).ok_or_else(invalid)?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let value: u64 = digits.parse().map_err(|_| invalid())?;

    let secs = match unit {
        Unit::Seconds => value,
        Unit::Minutes => value.checked_mul(SECS_PER_MINUTE).ok_or_else(invalid)?,
    };

    Ok(Duration::from_secs(secs))
}

/// Split off the trailing unit character.
fn split_unit(input: &str) -> Option<(&str, Unit)> {
    if let Some(digits) = input.strip_suffix('s') {
        Some((digits, Unit::Seconds))
    } else if let Some(digits) = input.strip_suffix('m') {
        Some((digits, Unit::Minutes))
    } else {
        None
    }
}

impl std::fmt::Display for DurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationError::InvalidFormat { input } => {
                write!(
                    f,
                    "invalid duration format: {:?} (expected e.g. 30s or 5m)",
                    input
                )
            }
        }
    }
}

impl std::error::Error for DurationError {}

// ============================================================================
// TESTS
// ============================================================================
