use crate::errors::{AppError, AppResult, classify_store_error};
use crate::models::{
    AttendanceFilter, AttendanceKey, AttendanceRecord, AttendanceStatus, NewAttendance,
};
use crate::utils::date::next_timestamp;
use chrono::{NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const COLUMNS: &str = "id, student_id, classroom_id, date, status, marked_by, remarks, \
                       created_at, updated_at, deleted_at";

pub fn map_row(row: &Row) -> Result<AttendanceRecord> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let status_str: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            Box::new(AppError::Other(format!("Invalid status: {}", status_str))),
        )
    })?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        classroom_id: row.get("classroom_id")?,
        date,
        status,
        marked_by: row.get("marked_by")?,
        remarks: row.get("remarks")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        deleted_at: row.get("deleted_at")?,
    })
}

/// WHERE clause (without the keyword) and its positional parameters.
/// Soft-deleted rows are always excluded.
pub fn filter_clause(filter: &AttendanceFilter) -> (String, Vec<String>) {
    let mut clauses = vec!["deleted_at IS NULL".to_string()];
    let mut args = Vec::new();

    if let Some(s) = &filter.student_id {
        args.push(s.clone());
        clauses.push(format!("student_id = ?{}", args.len()));
    }
    if let Some(c) = &filter.classroom_id {
        args.push(c.clone());
        clauses.push(format!("classroom_id = ?{}", args.len()));
    }

    let (from, to) = filter.bounds();
    if let Some(f) = from {
        args.push(f.format("%Y-%m-%d").to_string());
        clauses.push(format!("date >= ?{}", args.len()));
    }
    if let Some(t) = to {
        args.push(t.format("%Y-%m-%d").to_string());
        clauses.push(format!("date <= ?{}", args.len()));
    }

    (clauses.join(" AND "), args)
}

/// Load live records matching `filter`, oldest day first.
pub fn list_records(conn: &Connection, filter: &AttendanceFilter) -> AppResult<Vec<AttendanceRecord>> {
    select_records(conn, filter).map_err(classify_store_error)
}

fn select_records(conn: &Connection, filter: &AttendanceFilter) -> Result<Vec<AttendanceRecord>> {
    let (clause, args) = filter_clause(filter);
    let sql = format!(
        "SELECT {COLUMNS} FROM attendance
         WHERE {clause}
         ORDER BY date ASC, student_id ASC, classroom_id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Grouped totals per (student, classroom): `(student, classroom, total, present)`.
pub fn group_totals(
    conn: &Connection,
    filter: &AttendanceFilter,
) -> AppResult<Vec<(String, String, i64, i64)>> {
    select_group_totals(conn, filter).map_err(classify_store_error)
}

fn select_group_totals(
    conn: &Connection,
    filter: &AttendanceFilter,
) -> Result<Vec<(String, String, i64, i64)>> {
    let (clause, args) = filter_clause(filter);
    let sql = format!(
        "SELECT student_id, classroom_id,
                COUNT(*) AS total_days,
                SUM(CASE WHEN status = 'present' THEN 1 ELSE 0 END) AS present_days
         FROM attendance
         WHERE {clause}
         GROUP BY student_id, classroom_id
         ORDER BY student_id ASC, classroom_id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, i64>(3)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Look up a record by its natural key, soft-deleted rows included.
pub fn find_by_key(conn: &Connection, key: &AttendanceKey) -> Result<Option<AttendanceRecord>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM attendance
         WHERE student_id = ?1 AND classroom_id = ?2 AND date = ?3"
    );
    conn.query_row(
        &sql,
        params![key.student_id(), key.classroom_id(), key.date_str()],
        map_row,
    )
    .optional()
}

/// Look up a record by surface id, soft-deleted rows included.
pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<AttendanceRecord>> {
    let sql = format!("SELECT {COLUMNS} FROM attendance WHERE id = ?1");
    conn.query_row(&sql, [id], map_row).optional()
}

/// Insert-or-update on the natural key in one statement.
///
/// On conflict the mark, author, remarks and `updated_at` are replaced and
/// the row is revived; `created_at` keeps its first value. Returns the row id.
pub fn upsert(conn: &Connection, entry: &NewAttendance) -> Result<i64> {
    let key = &entry.key;

    let previous: Option<String> = conn
        .query_row(
            "SELECT updated_at FROM attendance
             WHERE student_id = ?1 AND classroom_id = ?2 AND date = ?3",
            params![key.student_id(), key.classroom_id(), key.date_str()],
            |row| row.get(0),
        )
        .optional()?;

    let ts = next_timestamp(previous.as_deref(), Utc::now());

    conn.query_row(
        "INSERT INTO attendance
            (student_id, classroom_id, date, status, marked_by, remarks, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
         ON CONFLICT(student_id, classroom_id, date) DO UPDATE SET
            status     = excluded.status,
            marked_by  = excluded.marked_by,
            remarks    = excluded.remarks,
            updated_at = excluded.updated_at,
            deleted_at = NULL
         RETURNING id",
        params![
            key.student_id(),
            key.classroom_id(),
            key.date_str(),
            entry.status.to_db_str(),
            entry.marked_by,
            entry.remarks,
            ts,
        ],
        |row| row.get(0),
    )
}

/// Plain insert; fails on an occupied key.
pub fn insert(conn: &Connection, entry: &NewAttendance) -> Result<i64> {
    let key = &entry.key;
    let ts = next_timestamp(None, Utc::now());

    conn.execute(
        "INSERT INTO attendance
            (student_id, classroom_id, date, status, marked_by, remarks, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        params![
            key.student_id(),
            key.classroom_id(),
            key.date_str(),
            entry.status.to_db_str(),
            entry.marked_by,
            entry.remarks,
            ts,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update all mutable fields of a record (everything except id and created_at).
pub fn update_record(conn: &Connection, rec: &AttendanceRecord) -> Result<usize> {
    conn.execute(
        "UPDATE attendance
         SET date = ?1, status = ?2, marked_by = ?3, remarks = ?4,
             updated_at = ?5, deleted_at = ?6
         WHERE id = ?7",
        params![
            rec.date_str(),
            rec.status.to_db_str(),
            rec.marked_by,
            rec.remarks,
            rec.updated_at,
            rec.deleted_at,
            rec.id,
        ],
    )
}

pub fn soft_delete(conn: &Connection, id: i64, at: &str) -> Result<usize> {
    conn.execute(
        "UPDATE attendance SET deleted_at = ?1, updated_at = ?1
         WHERE id = ?2 AND deleted_at IS NULL",
        params![at, id],
    )
}

pub fn hard_delete(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM attendance WHERE id = ?1", [id])
}
