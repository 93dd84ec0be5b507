use super::{key::AttendanceKey, status::AttendanceStatus};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: String,      // ⇔ attendance.student_id
    pub classroom_id: String,    // ⇔ attendance.classroom_id
    pub date: NaiveDate,         // ⇔ attendance.date (TEXT "YYYY-MM-DD")
    pub status: AttendanceStatus, // ⇔ attendance.status ('present' | 'absent')
    pub marked_by: Option<String>,
    pub remarks: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

impl AttendanceRecord {
    pub fn key(&self) -> AttendanceKey {
        AttendanceKey::new(&self.student_id, &self.classroom_id, self.date)
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
