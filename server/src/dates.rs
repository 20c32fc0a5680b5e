//! Date-window normalization.
//!
//! Callers supply plain `YYYY-MM-DD` dates; the NVP API wants full
//! `YYYY-MM-DDTHH:MM:SSZ` timestamps. A search window runs from the
//! start of the first day through the last second of the last day.

use chrono::NaiveDate;

/// Expands a `YYYY-MM-DD` date to the start of that day in UTC.
pub fn day_start_utc(date: &str) -> Result<String, String> {
    validate(date)?;
    Ok(format!("{date}T00:00:00Z"))
}

/// Expands a `YYYY-MM-DD` date to the last second of that day in UTC.
pub fn day_end_utc(date: &str) -> Result<String, String> {
    validate(date)?;
    Ok(format!("{date}T23:59:59Z"))
}

fn validate(date: &str) -> Result<(), String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| format!("invalid date {:?}: expected YYYY-MM-DD", date))
}
