//! Elapsed-time threshold parser for CLI arguments.
//!
//! Supports:
//! - Milliseconds: `500ms`
//! - Seconds: `5s` or plain `5`
//! - Minutes: `2m`
//! - Hours: `1h` (stored as minutes)

use crate::filter::{TimeRange, TimeUnit};

/// Error type for duration parsing failures.
#[derive(Debug, Clone)]
pub struct DurationParseError {
    pub input: String,
    pub message: String,
}

impl std::fmt::Display for DurationParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse duration '{}': {}", self.input, self.message)
    }
}

impl std::error::Error for DurationParseError {}

/// Parse a duration threshold such as `500ms`, `5s` or `2m`.
///
/// # Examples
///
/// ```
/// use recent_txns::filter::{TimeRange, TimeUnit};
/// use recent_txns::util::parse_duration;
///
/// assert_eq!(parse_duration("500ms").unwrap(), TimeRange::new(500, TimeUnit::Milliseconds));
/// assert_eq!(parse_duration("5").unwrap(), TimeRange::new(5, TimeUnit::Seconds));
/// ```
pub fn parse_duration(input: &str) -> Result<TimeRange, DurationParseError> {
    let input = input.trim();
    let error = |message: &str| DurationParseError {
        input: input.to_string(),
        message: message.to_string(),
    };

    if input.is_empty() {
        return Err(error("empty duration"));
    }

    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (number_str, unit_str) = input.split_at(split);

    if number_str.is_empty() {
        return Err(error("expected a number, e.g. 500ms, 5s, 2m"));
    }

    let number: u64 = number_str
        .parse()
        .map_err(|_| error("number out of range"))?;

    match unit_str.trim() {
        "ms" => Ok(TimeRange::new(number, TimeUnit::Milliseconds)),
        "" | "s" => Ok(TimeRange::new(number, TimeUnit::Seconds)),
        "m" => Ok(TimeRange::new(number, TimeUnit::Minutes)),
        "h" => number
            .checked_mul(60)
            .map(|minutes| TimeRange::new(minutes, TimeUnit::Minutes))
            .ok_or_else(|| error("number out of range")),
        _ => Err(error("unknown unit. Use: ms, s, m or h")),
    }
}
