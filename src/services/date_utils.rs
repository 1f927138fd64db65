use chrono::NaiveDate;
use serde_json::json;

use crate::error::{AppError, AppResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|err| {
        AppError::validation_with_details(
            "invalid calendar date",
            json!({"value": value, "error": err.to_string()}),
        )
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Shared whole days between two closed date ranges, clamped to zero.
///
/// Day-difference semantics: ranges that merely touch at a boundary day
/// (`end_a == start_b`) and equal single-day ranges compute to zero, so
/// touching is not overlapping. Malformed ranges (start after end) also
/// clamp to zero here; callers reject them before scanning.
pub fn overlap_days(
    start_a: NaiveDate,
    end_a: NaiveDate,
    start_b: NaiveDate,
    end_b: NaiveDate,
) -> i64 {
    let latest_start = start_a.max(start_b);
    let earliest_end = end_a.min(end_b);
    (earliest_end - latest_start).num_days().max(0)
}
