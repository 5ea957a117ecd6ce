//! Calendar-date helpers for form defaults, display and backend payloads.
//!
//! Dates arrive from many places (date pickers, pasted spreadsheet cells,
//! formatted backend values), so parsing is lenient and never fails loudly.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Utc};

/// Placeholder shown when a date is missing or unreadable.
pub const EMPTY_DATE: &str = "—";

/// All-digit values at or above this are epoch milliseconds; below it they
/// are spreadsheet serial day numbers.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000;

/// Latest year that still formats as four digits.
const MAX_YEAR: i32 = 9999;

/// Month-name layouts; `{Y}` becomes `%Y` or `%y` depending on the year width.
const NAMED_MONTH_FORMATS: [&str; 5] = [
    "%d %b {Y}",
    "%d-%b-{Y}",
    "%d %b, {Y}",
    "%b %d, {Y}",
    "%b %d {Y}",
];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Today's local calendar date as `YYYY-MM-DD`.
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Parses a date written in any of the commonly seen layouts.
///
/// Accepts ISO dates and datetimes (the calendar date as written),
/// day-first numeric dates (`DD/MM/YYYY`, `D/M/YY`, `DD-MM-YYYY`,
/// `DD.MM.YYYY`), month names (`5 Jan 2024`, `Jan 5, 2024`), epoch
/// milliseconds and spreadsheet serial numbers.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if s.bytes().all(|b| b.is_ascii_digit() || b == b'.') && s.matches('.').count() <= 1 {
        return parse_numeric(s);
    }

    if let Some(date) = parse_separated(s) {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }

    let year_token = if trailing_digits(s) == 2 { "%y" } else { "%Y" };
    for layout in NAMED_MONTH_FORMATS {
        let format = layout.replace("{Y}", year_token);
        if let Ok(date) = NaiveDate::parse_from_str(s, &format) {
            return Some(date);
        }
    }

    None
}

/// Converts a loosely formatted date to `YYYY-MM-DD`.
///
/// Unreadable input is returned trimmed but otherwise untouched.
pub fn to_iso_date_only(input: &str) -> String {
    match parse_date(input) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => input.trim().to_string(),
    }
}

/// Formats a date for display as `DD/MM/YYYY`.
pub fn format_nz_date(value: Option<&str>) -> String {
    value
        .and_then(parse_date)
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| EMPTY_DATE.to_string())
}

/// Converts a date to the backend's datetime representation (midnight UTC).
pub fn to_backend_datetime(input: &str) -> Option<String> {
    parse_date(input).map(|date| date.format("%Y-%m-%dT00:00:00Z").to_string())
}

fn parse_numeric(s: &str) -> Option<NaiveDate> {
    if s.contains('.') {
        // "45292.5" style serials carry a time-of-day fraction.
        let serial: f64 = s.parse().ok()?;
        return from_serial(serial.floor() as i64);
    }

    let value: i64 = s.parse().ok()?;
    if value >= EPOCH_MILLIS_THRESHOLD {
        DateTime::<Utc>::from_timestamp_millis(value)
            .map(|dt| dt.date_naive())
            .filter(|date| date.year() <= MAX_YEAR)
    } else {
        from_serial(value)
    }
}

fn from_serial(days: i64) -> Option<NaiveDate> {
    if !(1..EPOCH_MILLIS_THRESHOLD).contains(&days) {
        return None;
    }
    // Day zero of the 1900 date system, adjusted for its phantom 1900-02-29.
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(chrono::Duration::days(days))
}

/// `YYYY-MM-DD`, `YYYY/MM/DD` or day-first `DD/MM/YYYY` with `/`, `-` or `.`.
fn parse_separated(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split(['/', '-', '.']).collect();
    if parts.len() != 3
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let numbers: Vec<u32> = parts
        .iter()
        .map(|p| p.parse::<u32>())
        .collect::<Result<_, _>>()
        .ok()?;

    if parts[0].len() == 4 {
        return NaiveDate::from_ymd_opt(numbers[0] as i32, numbers[1], numbers[2]);
    }

    let year = match parts[2].len() {
        2 => expand_two_digit_year(numbers[2]),
        4 => numbers[2] as i32,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, numbers[1], numbers[0])
}

fn expand_two_digit_year(year: u32) -> i32 {
    if year < 70 {
        2000 + year as i32
    } else {
        1900 + year as i32
    }
}

fn trailing_digits(s: &str) -> usize {
    s.chars().rev().take_while(|c| c.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_iso_shape() {
        let today = today_iso();
        assert_eq!(today.len(), 10);
        assert!(NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_date("2024-01-05"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("  2024-01-05 "), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn test_parse_iso_datetime_keeps_written_date() {
        assert_eq!(parse_date("2024-01-05T23:30:00+13:00"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("2024-01-05T00:00:00Z"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("2024-01-05T08:15:00"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("2024-01-05 08:15"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn test_parse_day_first_numeric() {
        assert_eq!(parse_date("05/01/2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("5/1/2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("5/1/24"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("05-01-2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("05.01.2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("2024/01/05"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn test_parse_two_digit_year_pivot() {
        assert_eq!(parse_date("01/02/69"), Some(ymd(2069, 2, 1)));
        assert_eq!(parse_date("01/02/70"), Some(ymd(1970, 2, 1)));
    }

    #[test]
    fn test_parse_month_names() {
        assert_eq!(parse_date("5 Jan 2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("5 January 2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("5-Jan-24"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("Jan 5, 2024"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn test_parse_epoch_millis() {
        assert_eq!(parse_date("1704412800000"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn test_parse_spreadsheet_serial() {
        assert_eq!(parse_date("45292"), Some(ymd(2024, 1, 1)));
        assert_eq!(parse_date("45292.75"), Some(ymd(2024, 1, 1)));
    }

    #[test]
    fn test_eight_digit_values_are_epoch_millis() {
        // 20240105 ms after the epoch is still 1 January 1970.
        assert_eq!(parse_date("20240105"), Some(ymd(1970, 1, 1)));
    }

    #[test]
    fn test_epoch_millis_past_year_9999_are_rejected() {
        assert_eq!(parse_date("253402300800000"), None);
        assert_eq!(to_iso_date_only("253402300800000"), "253402300800000");
        assert_eq!(parse_date("253402214400000"), Some(ymd(9999, 12, 31)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("tomorrow"), None);
        assert_eq!(parse_date("31/02/2024"), None);
        assert_eq!(parse_date("1/2/3/4"), None);
        assert_eq!(parse_date("0"), None);
    }

    #[test]
    fn test_to_iso_date_only() {
        assert_eq!(to_iso_date_only("05/01/2024"), "2024-01-05");
        assert_eq!(to_iso_date_only("next tuesday "), "next tuesday");
    }

    #[test]
    fn test_format_nz_date() {
        assert_eq!(format_nz_date(Some("2024-01-05")), "05/01/2024");
        assert_eq!(format_nz_date(Some("2024-01-05T00:00:00Z")), "05/01/2024");
        assert_eq!(format_nz_date(Some("")), EMPTY_DATE);
        assert_eq!(format_nz_date(Some("garbage")), EMPTY_DATE);
        assert_eq!(format_nz_date(None), EMPTY_DATE);
    }

    #[test]
    fn test_to_backend_datetime() {
        assert_eq!(
            to_backend_datetime("05/01/2024").as_deref(),
            Some("2024-01-05T00:00:00Z")
        );
        assert_eq!(to_backend_datetime("soon"), None);
    }

    #[test]
    fn test_format_then_parse_round_trip() {
        for input in ["2024-01-05", "05/01/2024", "1704412800000", "2023-12-31", "29/02/2024"] {
            let expected = parse_date(input).unwrap();
            let formatted = format_nz_date(Some(input));
            assert_eq!(parse_date(&formatted), Some(expected), "input {}", input);
        }
    }
}
