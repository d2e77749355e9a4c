use chrono::{Days, NaiveDate};

use spend_ingest::coerce::{coerce_date, coerce_number};
use spend_ingest::types::Value;

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn number_strips_grouping_separators() {
    assert_eq!(coerce_number(&text("1,234.50")), Some(1234.5));
    assert_eq!(coerce_number(&text("12,34,567")), Some(1234567.0));
}

#[test]
fn number_passes_native_numbers_through() {
    assert_eq!(coerce_number(&Value::Number(98.5)), Some(98.5));
}

#[test]
fn number_degrades_to_none() {
    assert_eq!(coerce_number(&Value::Null), None);
    assert_eq!(coerce_number(&text("")), None);
    assert_eq!(coerce_number(&text("   ")), None);
    assert_eq!(coerce_number(&text("abc")), None);
    assert_eq!(coerce_number(&text("NaN")), None);
}

#[test]
fn date_iso_round_trip() {
    assert_eq!(coerce_date(&text("2025-08-17")), Some(ymd(2025, 8, 17)));
}

#[test]
fn date_iso_with_time_takes_calendar_component() {
    assert_eq!(
        coerce_date(&text("2025-08-17 14:30:00")),
        Some(ymd(2025, 8, 17))
    );
    assert_eq!(
        coerce_date(&text("2025-08-17T10:00:00Z")),
        Some(ymd(2025, 8, 17))
    );
}

#[test]
fn date_day_first_not_month_first() {
    assert_eq!(coerce_date(&text("31/12/2024")), Some(ymd(2024, 12, 31)));
    assert_eq!(coerce_date(&text("3.9.2025")), Some(ymd(2025, 9, 3)));
    assert_eq!(coerce_date(&text("03-09-2025")), Some(ymd(2025, 9, 3)));
}

#[test]
fn date_day_first_ignores_trailing_time() {
    assert_eq!(
        coerce_date(&text("31/12/2024 23:59")),
        Some(ymd(2024, 12, 31))
    );
}

#[test]
fn date_day_month_name() {
    assert_eq!(coerce_date(&text("03-Sep-2025")), Some(ymd(2025, 9, 3)));
    assert_eq!(coerce_date(&text("3-sept-2025")), Some(ymd(2025, 9, 3)));
    assert_eq!(coerce_date(&text("14-AUG-2025")), Some(ymd(2025, 8, 14)));
    assert_eq!(coerce_date(&text("1-December-2024")), Some(ymd(2024, 12, 1)));
}

#[test]
fn date_spreadsheet_serial_from_number_cell() {
    // Days since 1899-12-30; verified against chrono's calendar arithmetic.
    assert_eq!(coerce_date(&Value::Number(45901.0)), Some(ymd(2025, 9, 1)));
    assert_eq!(coerce_date(&Value::Number(45886.0)), Some(ymd(2025, 8, 17)));
    assert_eq!(coerce_date(&Value::Number(45658.0)), Some(ymd(2025, 1, 1)));
}

#[test]
fn date_spreadsheet_serial_with_time_fraction_floors_to_day() {
    assert_eq!(coerce_date(&Value::Number(45901.75)), Some(ymd(2025, 9, 1)));
}

#[test]
fn date_spreadsheet_serial_from_bare_integer_string() {
    assert_eq!(coerce_date(&text("45901")), Some(ymd(2025, 9, 1)));
}

#[test]
fn date_serial_outside_plausible_range_is_rejected() {
    assert_eq!(coerce_date(&Value::Number(0.0)), None);
    assert_eq!(coerce_date(&Value::Number(-3.0)), None);
    assert_eq!(coerce_date(&Value::Number(250_000.0)), None);
}

#[test]
fn date_year_like_string_is_misread_as_serial() {
    // Known edge case of the serial-range heuristic: a malformed year-only
    // cell sits inside the window and is read as a day serial.
    let expected = ymd(1899, 12, 30) + Days::new(2024);
    assert_eq!(coerce_date(&text("2024")), Some(expected));
}

#[test]
fn date_degrades_to_none() {
    assert_eq!(coerce_date(&Value::Null), None);
    assert_eq!(coerce_date(&text("")), None);
    assert_eq!(coerce_date(&text("not a date")), None);
    assert_eq!(coerce_date(&text("32/13/2024")), None);
    assert_eq!(coerce_date(&text("03-Xyz-2025")), None);
}
