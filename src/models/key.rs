use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Natural key of an attendance record: one mark per student, classroom and day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AttendanceKey {
    student_id: String,
    classroom_id: String,
    date: NaiveDate,
}

impl AttendanceKey {
    pub fn new(student_id: impl Into<String>, classroom_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            student_id: student_id.into(),
            classroom_id: classroom_id.into(),
            date,
        }
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn classroom_id(&self) -> &str {
        &self.classroom_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for AttendanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.student_id,
            self.classroom_id,
            self.date_str()
        )
    }
}
