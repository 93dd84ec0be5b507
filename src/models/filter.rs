use crate::errors::{AppError, AppResult};
use crate::utils::date::{month_bounds, parse_iso_date};
use chrono::NaiveDate;

/// Selection shared by list, aggregate, report and export.
///
/// Date bounds are inclusive and independent; `month` narrows them further.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceFilter {
    pub student_id: Option<String>,
    pub classroom_id: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub month: Option<String>,
}

impl AttendanceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn student(mut self, id: impl Into<String>) -> Self {
        self.student_id = Some(id.into());
        self
    }

    pub fn classroom(mut self, id: impl Into<String>) -> Self {
        self.classroom_id = Some(id.into());
        self
    }

    pub fn since(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    pub fn until(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    pub fn month(mut self, month: &str) -> AppResult<Self> {
        if month_bounds(month).is_none() {
            return Err(AppError::InvalidDate(format!(
                "{month} (expected YYYY-MM)"
            )));
        }
        self.month = Some(month.to_string());
        Ok(self)
    }

    /// Parse optional `YYYY-MM-DD` text bounds, as received from the CLI.
    pub fn with_text_bounds(mut self, from: Option<&str>, to: Option<&str>) -> AppResult<Self> {
        if let Some(f) = from {
            self.date_from =
                Some(parse_iso_date(f).ok_or_else(|| AppError::InvalidDate(f.to_string()))?);
        }
        if let Some(t) = to {
            self.date_to =
                Some(parse_iso_date(t).ok_or_else(|| AppError::InvalidDate(t.to_string()))?);
        }
        Ok(self)
    }

    /// Effective inclusive bounds after folding `month` into `date_from`/`date_to`.
    pub fn bounds(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let (mut from, mut to) = (self.date_from, self.date_to);

        if let Some((m_start, m_end)) = self.month.as_deref().and_then(month_bounds) {
            from = Some(from.map_or(m_start, |f| f.max(m_start)));
            to = Some(to.map_or(m_end, |t| t.min(m_end)));
        }

        (from, to)
    }
}
