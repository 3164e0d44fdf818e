//! Calendar-day helpers for the booking calendar.
//!
//! Blocked dates are stored as `YYYY-MM-DD` day tokens rather than
//! timestamps, so every booking range is expanded to one token per night
//! using plain calendar arithmetic.

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

/// Format used for day tokens in `booked_dates`
pub const DAY_TOKEN_FORMAT: &str = "%Y-%m-%d";

/// Format a calendar date as a day token
pub fn day_token(date: NaiveDate) -> String {
    date.format(DAY_TOKEN_FORMAT).to_string()
}

/// Parse a day token back into a calendar date
pub fn parse_day_token(token: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(token.trim(), DAY_TOKEN_FORMAT)
        .map_err(|e| AppError::Validation(format!("Invalid date '{}': {}", token, e)))
}

/// Expand `[start, end]` into ordered, inclusive day tokens.
///
/// An inverted range (`start > end`) yields an empty sequence.
pub fn expand(start: NaiveDate, end: NaiveDate) -> Vec<String> {
    if start > end {
        return Vec::new();
    }

    let len = (end - start).num_days() as usize + 1;
    start.iter_days().take(len).map(day_token).collect()
}
