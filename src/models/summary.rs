use super::record::AttendanceRecord;
use serde::Serialize;

/// Per (student, classroom) totals over a filtered record set.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AttendanceSummary {
    pub student_id: String,
    pub classroom_id: String,
    pub total_days: i64,
    pub present_days: i64,
    pub absent_days: i64,
    pub attendance_percent: f64,
}

impl AttendanceSummary {
    pub fn new(student_id: String, classroom_id: String, total: i64, present: i64) -> Self {
        Self {
            student_id,
            classroom_id,
            total_days: total,
            present_days: present,
            absent_days: total - present,
            attendance_percent: percent(present, total),
        }
    }
}

/// Overall figures plus per-day rows for one report scope.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceReport {
    pub student_id: Option<String>,
    pub classroom_id: Option<String>,
    pub month: Option<String>,
    pub present: i64,
    pub absent: i64,
    pub total: i64,
    pub attendance_percent: f64,
    pub details: Vec<AttendanceRecord>,
}

/// `present / total * 100` rounded to two decimals; zero when nothing was counted.
pub fn percent(present: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(present as f64 / total as f64 * 100.0)
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
