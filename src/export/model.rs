// src/export/model.rs

use crate::models::{AttendanceRecord, AttendanceSummary};
use serde::Serialize;

/// Flat row shape shared by the CSV, XLSX and PDF writers.
pub(crate) trait ExportRow: Serialize {
    fn headers() -> &'static [&'static str];
    fn to_row(&self) -> Vec<String>;

    /// Columns written as numbers in spreadsheets.
    fn numeric_columns() -> &'static [usize] {
        &[]
    }
}

/// One attendance mark, as exported.
#[derive(Serialize, Clone, Debug)]
pub struct DetailExport {
    pub date: String,
    pub student_id: String,
    pub classroom_id: String,
    pub status: String,
    pub marked_by: String,
    pub remarks: String,
}

impl From<&AttendanceRecord> for DetailExport {
    fn from(r: &AttendanceRecord) -> Self {
        Self {
            date: r.date_str(),
            student_id: r.student_id.clone(),
            classroom_id: r.classroom_id.clone(),
            status: r.status.to_db_str().to_string(),
            marked_by: r.marked_by.clone().unwrap_or_default(),
            remarks: r.remarks.clone().unwrap_or_default(),
        }
    }
}

impl ExportRow for DetailExport {
    fn headers() -> &'static [&'static str] {
        &[
            "date",
            "student_id",
            "classroom_id",
            "status",
            "marked_by",
            "remarks",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.student_id.clone(),
            self.classroom_id.clone(),
            self.status.clone(),
            self.marked_by.clone(),
            self.remarks.clone(),
        ]
    }
}

/// Totals for one (student, classroom) pair, as exported.
#[derive(Serialize, Clone, Debug)]
pub struct SummaryExport {
    pub student_id: String,
    pub classroom_id: String,
    pub total_days: i64,
    pub present_days: i64,
    pub absent_days: i64,
    pub attendance_percent: f64,
}

impl From<&AttendanceSummary> for SummaryExport {
    fn from(s: &AttendanceSummary) -> Self {
        Self {
            student_id: s.student_id.clone(),
            classroom_id: s.classroom_id.clone(),
            total_days: s.total_days,
            present_days: s.present_days,
            absent_days: s.absent_days,
            attendance_percent: s.attendance_percent,
        }
    }
}

impl ExportRow for SummaryExport {
    fn headers() -> &'static [&'static str] {
        &[
            "student_id",
            "classroom_id",
            "total_days",
            "present_days",
            "absent_days",
            "attendance_percent",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.student_id.clone(),
            self.classroom_id.clone(),
            self.total_days.to_string(),
            self.present_days.to_string(),
            self.absent_days.to_string(),
            format!("{:.2}", self.attendance_percent),
        ]
    }

    fn numeric_columns() -> &'static [usize] {
        &[2, 3, 4, 5]
    }
}

pub(crate) fn rows_to_table<T: ExportRow>(rows: &[T]) -> Vec<Vec<String>> {
    rows.iter().map(ExportRow::to_row).collect()
}
