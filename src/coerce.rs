//! Scalar coercion: raw cell values into typed scalars.
//!
//! Both coercers are total — bad input degrades to `None`, never an error.
//! The decision between "drop the row" and "default the value" belongs to
//! the calling normalizer, because it differs per field's business meaning.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};

use crate::types::Value;

/// Day-serial window accepted by the spreadsheet-serial strategy.
///
/// The lower bound excludes day zero and negatives; the upper bound sits far
/// past any realistic report date (serial 100 000 is in the year 2173). The
/// window is a heuristic: year-like integer strings such as `"2024"` fall
/// inside it and are read as serials. Known edge case, covered by tests.
const SERIAL_MIN_EXCLUSIVE: f64 = 0.0;
const SERIAL_MAX_EXCLUSIVE: f64 = 100_000.0;

/// The spreadsheet day-serial epoch (the historical 1900 system counts from
/// 1899-12-30, off by two from the nominal 1900-01-01).
fn serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).expect("fixed epoch")
}

/// Coerce a raw cell into a number.
///
/// Text values may carry `,` grouping separators ("1,234.50" -> 1234.5).
/// Null, empty, and non-numeric input return `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(*n),
        Value::Text(s) => {
            let cleaned = s.trim().replace(',', "");
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
        }
    }
}

/// Coerce a raw cell into a calendar date.
///
/// Strategy chain, first success wins:
///
/// 1. bare integer in the plausible spreadsheet-serial window -> days since
///    1899-12-30 (native numeric cells take this path directly);
/// 2. general ISO/RFC date or date-time (UTC calendar date);
/// 3. `D[./-]M[./-]YYYY` with optional trailing time, day-first — source
///    exports come from day-first locales;
/// 4. `D-MonthName-YYYY` with a 3+ letter month abbreviation,
///    case-insensitive ("sept" included).
///
/// The serial strategy runs first so that plain-year-like strings are not
/// ambiguous with later parsers.
pub fn coerce_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Null => None,
        Value::Number(n) => date_from_serial(*n),
        Value::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            parse_serial_text(trimmed)
                .or_else(|| parse_iso(trimmed))
                .or_else(|| parse_day_first(trimmed))
                .or_else(|| parse_day_month_name(trimmed))
        }
    }
}

fn date_from_serial(n: f64) -> Option<NaiveDate> {
    if !(n > SERIAL_MIN_EXCLUSIVE && n < SERIAL_MAX_EXCLUSIVE) {
        return None;
    }
    // Fractional serials carry a time-of-day component; the calendar day is
    // the integer part.
    serial_epoch().checked_add_days(Days::new(n.floor() as u64))
}

fn parse_serial_text(s: &str) -> Option<NaiveDate> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok().and_then(date_from_serial)
}

fn parse_iso(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.to_utc().date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.to_utc().date_naive());
    }
    static FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn parse_day_first(s: &str) -> Option<NaiveDate> {
    // Trailing time, if any, is whitespace-separated and ignored.
    let date_part = s.split_whitespace().next()?;
    static FORMATS: &[&str] = &["%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y"];
    for fmt in FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(date_part, fmt) {
            return Some(d);
        }
    }
    None
}

fn parse_day_month_name(s: &str) -> Option<NaiveDate> {
    let date_part = s.split_whitespace().next()?;
    let mut parts = date_part.split('-');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let day: u32 = day.trim().parse().ok()?;
    let year: i32 = year.trim().parse().ok()?;
    let month = month_from_name(month.trim())?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Matches a 3+ letter prefix of an English month name, case-insensitively.
/// Prefix matching makes "sept" a September alias for free.
fn month_from_name(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    if name.len() < 3 || !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let lower = name.to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|m| m.starts_with(lower.as_str()))
        .map(|idx| idx as u32 + 1)
}
