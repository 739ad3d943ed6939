//! Spreadsheet date serial numbers.
//!
//! A date cell stores a day count in the 1900 date system. Serial 1 is
//! 1900-01-01, but the format also counts a 1900-02-29 that never existed, so
//! for every date from March 1900 onwards the calendar date is
//! `1900-01-01 + (serial - 2)` days. That formula is applied to all serials,
//! reproducing the historical offset for compatibility.

use chrono::{Days, NaiveDate};

/// Day count subtracted from a serial before adding it to 1900-01-01.
const SERIAL_OFFSET: i64 = 2;

/// Convert a day-count serial to a calendar date.
///
/// Returns `None` when the result falls outside the supported date range.
pub fn serial_to_date(serial: i64) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1900, 1, 1)?;
    let offset = serial.checked_sub(SERIAL_OFFSET)?;
    if offset >= 0 {
        epoch.checked_add_days(Days::new(offset as u64))
    } else {
        epoch.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

/// Render a raw date cell as `YYYY-MM-DD`.
///
/// Whole-number and decimal serials are decoded (the time fraction is
/// dropped). Any other text is returned unchanged; an absent cell stays absent.
pub fn format_date_cell(raw: Option<&str>) -> Option<String> {
    let text = raw?;
    match parse_serial(text.trim()) {
        Some(serial) => match serial_to_date(serial) {
            Some(date) => Some(date.format("%Y-%m-%d").to_string()),
            None => Some(text.to_string()),
        },
        None => Some(text.to_string()),
    }
}

fn parse_serial(text: &str) -> Option<i64> {
    if text.is_empty() {
        return None;
    }

    if text.bytes().all(|b| b.is_ascii_digit()) {
        return atoi_simd::parse_pos::<i64, false>(text.as_bytes()).ok();
    }

    if !text.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    let value: f64 = fast_float2::parse(text).ok()?;
    if value.is_finite() && value >= 0.0 && value < i64::MAX as f64 {
        Some(value.trunc() as i64)
    } else {
        None
    }
}
