//! Argument validation shared by the tools.
//!
//! The optimizer parses clock times leniently, so anything that reaches it
//! from outside is checked here first.

use chrono::NaiveDate;

use crate::error::{Result, ToolError};

pub const MAX_BUFFER_MINUTES: i64 = 120;

/// True when `s` has the same length as `shape` and holds an ASCII digit at
/// every `9` of `shape` and the literal byte everywhere else.
fn has_shape(s: &str, shape: &str) -> bool {
    s.len() == shape.len()
        && s.bytes().zip(shape.bytes()).all(|(c, p)| match p {
            b'9' => c.is_ascii_digit(),
            _ => c == p,
        })
}

/// A `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    if !has_shape(s, "9999-99-99") {
        return Err(ToolError::InvalidArguments(format!(
            "date must be YYYY-MM-DD, got '{s}'"
        )));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| ToolError::InvalidArguments(format!("invalid date '{s}': {e}")))
}

/// An `HH:MM` clock time. Hours past 23 are accepted for after-midnight
/// listings; minutes must be below 60.
pub fn check_time(field: &str, s: &str) -> Result<()> {
    let minutes_ok = s
        .get(3..)
        .and_then(|m| m.parse::<u32>().ok())
        .is_some_and(|m| m < 60);
    if has_shape(s, "99:99") && minutes_ok {
        Ok(())
    } else {
        Err(ToolError::InvalidArguments(format!(
            "{field} must be HH:MM, got '{s}'"
        )))
    }
}

/// Buffer between screenings, `0..=120` minutes.
pub fn check_buffer(minutes: i64) -> Result<u32> {
    if (0..=MAX_BUFFER_MINUTES).contains(&minutes) {
        Ok(minutes as u32)
    } else {
        Err(ToolError::InvalidArguments(format!(
            "bufferMinutes must be between 0 and {MAX_BUFFER_MINUTES}, got {minutes}"
        )))
    }
}

/// A list argument that must hold at least one entry.
pub fn check_non_empty(field: &str, values: &[String]) -> Result<()> {
    if values.is_empty() {
        Err(ToolError::InvalidArguments(format!(
            "{field} must contain at least one entry"
        )))
    } else {
        Ok(())
    }
}
