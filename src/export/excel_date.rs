// src/export/excel_date.rs

use chrono::NaiveDate;

/// Interpret a `YYYY-MM-DD` string as an Excel serial date.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;

    Some(("yyyy-mm-dd", (d - excel_epoch).num_days() as f64))
}
