//! Attendance totals and percentages.

use crate::db::pool::DbPool;
use crate::db::queries::{group_totals, list_records};
use crate::errors::AppResult;
use crate::models::summary::percent;
use crate::models::{AttendanceFilter, AttendanceReport, AttendanceSummary};
use std::cmp::Ordering;

/// One row per (student, classroom) pair with at least one matching record,
/// ordered by student then classroom.
pub fn aggregate(pool: &mut DbPool, filter: &AttendanceFilter) -> AppResult<Vec<AttendanceSummary>> {
    let rows = group_totals(&pool.conn, filter)?;

    Ok(rows
        .into_iter()
        .map(|(student, classroom, total, present)| {
            AttendanceSummary::new(student, classroom, total, present)
        })
        .collect())
}

/// Ranking order: highest percentage first, then student id, then classroom id.
pub fn rank_order(a: &AttendanceSummary, b: &AttendanceSummary) -> Ordering {
    b.attendance_percent
        .total_cmp(&a.attendance_percent)
        .then_with(|| a.student_id.cmp(&b.student_id))
        .then_with(|| a.classroom_id.cmp(&b.classroom_id))
}

/// `aggregate` sorted by `rank_order`, optionally truncated to `limit` rows (0 = all).
pub fn leaderboard(
    pool: &mut DbPool,
    filter: &AttendanceFilter,
    limit: usize,
) -> AppResult<Vec<AttendanceSummary>> {
    let mut rows = aggregate(pool, filter)?;
    rows.sort_by(rank_order);

    if limit > 0 {
        rows.truncate(limit);
    }
    Ok(rows)
}

/// Overall totals plus per-day detail for a single scope.
pub fn report(pool: &mut DbPool, filter: &AttendanceFilter) -> AppResult<AttendanceReport> {
    let details = list_records(&pool.conn, filter)?;

    let total = details.len() as i64;
    let present = details.iter().filter(|r| r.status.is_present()).count() as i64;

    Ok(AttendanceReport {
        student_id: filter.student_id.clone(),
        classroom_id: filter.classroom_id.clone(),
        month: filter.month.clone(),
        present,
        absent: total - present,
        total,
        attendance_percent: percent(present, total),
        details,
    })
}
