// src/export/range.rs

use crate::errors::{AppError, AppResult};
use crate::utils::date::{month_bounds, parse_iso_date};
use chrono::NaiveDate;

fn invalid(msg: &str, raw: &str) -> AppError {
    AppError::InvalidRange(format!("{msg}: '{raw}'"))
}

fn year_bounds(raw: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let y: i32 = raw.parse().map_err(|_| invalid("invalid year", raw))?;
    let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid("invalid year", raw))?;
    let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid("invalid year", raw))?;
    Ok((d1, d2))
}

/// Bounds of a single period: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn period_bounds(raw: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match raw.len() {
        4 => year_bounds(raw),
        7 => month_bounds(raw).ok_or_else(|| invalid("invalid month", raw)),
        10 => {
            let d = parse_iso_date(raw).ok_or_else(|| invalid("invalid date", raw))?;
            Ok((d, d))
        }
        _ => Err(invalid("unsupported range format", raw)),
    }
}

/// Parse `--range` into inclusive bounds.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    let Some((start_raw, end_raw)) = r.split_once(':') else {
        return period_bounds(r);
    };

    let start = start_raw.trim();
    let end = end_raw.trim();

    if start.len() != end.len() {
        return Err(invalid("start and end must have the same format", r));
    }

    let (d1, _) = period_bounds(start)?;
    let (_, d2) = period_bounds(end)?;

    if d1 > d2 {
        return Err(invalid("start is after end", r));
    }

    Ok((d1, d2))
}
