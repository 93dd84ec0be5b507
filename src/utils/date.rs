use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};

/// Fixed-width UTC timestamp layout; lexicographic order equals time order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Strict `YYYY-MM-DD` parse.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Timestamp for a write that must sort strictly after `previous`.
///
/// Uses the clock when it has moved on, otherwise `previous + 1µs`.
pub fn next_timestamp(previous: Option<&str>, now: DateTime<Utc>) -> String {
    match previous.and_then(parse_timestamp) {
        Some(prev) if now <= prev => format_timestamp(prev + Duration::microseconds(1)),
        _ => format_timestamp(now),
    }
}

pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Number of days in month `m` of year `y`.
pub fn month_last_day(y: i32, m: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(y, m, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    next.pred_opt().map(|d| d.day())
}

/// First and last day of a `YYYY-MM` month.
pub fn month_bounds(s: &str) -> Option<(NaiveDate, NaiveDate)> {
    let s = s.trim();
    if s.len() != 7 || s.as_bytes()[4] != b'-' {
        return None;
    }
    let y: i32 = s[0..4].parse().ok()?;
    let m: u32 = s[5..7].parse().ok()?;
    let last = month_last_day(y, m)?;

    Some((
        NaiveDate::from_ymd_opt(y, m, 1)?,
        NaiveDate::from_ymd_opt(y, m, last)?,
    ))
}
