//! Single-record operations by surface id.
//!
//! Unlike the batch path these fail fast: a bad payload is rejected with
//! every offending field, an unknown or unparseable id is `NotFound`.

use crate::db::log::{AuditEvent, audit_or_warn};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult, classify_store_error};
use crate::models::{
    AttendanceFilter, AttendanceKey, AttendancePatch, AttendanceRecord, Candidate, NewAttendance,
};
use crate::utils::date::next_timestamp;
use chrono::Utc;
use rusqlite::ErrorCode;

const ENTITY: &str = "attendance";

/// Surface ids are integers; anything else cannot name a record.
pub fn parse_id(id: &str) -> Option<i64> {
    id.trim().parse::<i64>().ok().filter(|v| *v > 0)
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("attendance record '{id}'"))
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

fn duplicate_key(key: &AttendanceKey) -> AppError {
    AppError::field("date", format!("attendance already recorded for {key}"))
}

/// Validate and store a new mark. `actor` fills `marked_by` when the payload
/// does not name one. A soft-deleted record with the same key is revived.
pub fn create(pool: &mut DbPool, data: &Candidate, actor: Option<&str>) -> AppResult<i64> {
    let mut entry = NewAttendance::from_candidate(data)?;
    if entry.marked_by.is_none() {
        entry.marked_by = actor.map(str::to_string);
    }

    let existing = queries::find_by_key(&pool.conn, &entry.key).map_err(classify_store_error)?;

    let id = match existing {
        Some(rec) if !rec.is_deleted() => return Err(duplicate_key(&entry.key)),
        Some(_) => queries::upsert(&pool.conn, &entry).map_err(classify_store_error)?,
        None => match queries::insert(&pool.conn, &entry) {
            Ok(id) => id,
            Err(e) if is_unique_violation(&e) => return Err(duplicate_key(&entry.key)),
            Err(e) => return Err(classify_store_error(e)),
        },
    };

    audit_or_warn(
        &pool.conn,
        &AuditEvent {
            event_type: "create",
            user_id: actor,
            entity_type: ENTITY,
            entity_id: &id.to_string(),
            description: &format!("{} marked {}", entry.key, entry.status),
        },
    );

    Ok(id)
}

/// Fetch a live record; unknown, unparseable or soft-deleted ids yield `None`.
pub fn get(pool: &mut DbPool, id: &str) -> AppResult<Option<AttendanceRecord>> {
    let Some(num) = parse_id(id) else {
        return Ok(None);
    };

    let rec = queries::find_by_id(&pool.conn, num).map_err(classify_store_error)?;
    Ok(rec.filter(|r| !r.is_deleted()))
}

/// Apply `patch` to a live record. Moving it onto a day already marked is a
/// `date` validation error; a soft-deleted record on that day is purged so
/// the move can take its place.
pub fn update(
    pool: &mut DbPool,
    id: &str,
    patch: &AttendancePatch,
    actor: Option<&str>,
) -> AppResult<AttendanceRecord> {
    let mut rec = get(pool, id)?.ok_or_else(|| not_found(id))?;

    if patch.is_empty() {
        return Err(AppError::field("body", "no updatable field supplied"));
    }

    let mut tombstone = None;
    if let Some(date) = patch.date
        && date != rec.date
    {
        let moved = AttendanceKey::new(&rec.student_id, &rec.classroom_id, date);
        if let Some(other) = queries::find_by_key(&pool.conn, &moved).map_err(classify_store_error)?
            && other.id != rec.id
        {
            if !other.is_deleted() {
                return Err(duplicate_key(&moved));
            }
            tombstone = Some(other.id);
        }
        rec.date = date;
    }

    if let Some(status) = patch.status {
        rec.status = status;
    }
    if let Some(by) = &patch.marked_by {
        rec.marked_by = Some(by.clone());
    }
    if let Some(remarks) = &patch.remarks {
        rec.remarks = Some(remarks.clone());
    }

    rec.updated_at = next_timestamp(Some(&rec.updated_at), Utc::now());

    let tx = pool.conn.transaction().map_err(classify_store_error)?;
    if let Some(old) = tombstone {
        queries::hard_delete(&tx, old).map_err(classify_store_error)?;
    }
    match queries::update_record(&tx, &rec) {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) => return Err(duplicate_key(&rec.key())),
        Err(e) => return Err(classify_store_error(e)),
    }
    tx.commit().map_err(classify_store_error)?;

    audit_or_warn(
        &pool.conn,
        &AuditEvent {
            event_type: "update",
            user_id: actor,
            entity_type: ENTITY,
            entity_id: &rec.id.to_string(),
            description: &format!("{} now {}", rec.key(), rec.status),
        },
    );

    Ok(rec)
}

/// Soft delete by default; `hard` removes the row, soft-deleted ones included.
pub fn delete(pool: &mut DbPool, id: &str, hard: bool, actor: Option<&str>) -> AppResult<()> {
    let num = parse_id(id).ok_or_else(|| not_found(id))?;
    let rec = queries::find_by_id(&pool.conn, num)
        .map_err(classify_store_error)?
        .ok_or_else(|| not_found(id))?;

    if hard {
        queries::hard_delete(&pool.conn, num).map_err(classify_store_error)?;
    } else {
        if rec.is_deleted() {
            return Err(not_found(id));
        }
        let at = next_timestamp(Some(&rec.updated_at), Utc::now());
        queries::soft_delete(&pool.conn, num, &at).map_err(classify_store_error)?;
    }

    audit_or_warn(
        &pool.conn,
        &AuditEvent {
            event_type: if hard { "hard_delete" } else { "delete" },
            user_id: actor,
            entity_type: ENTITY,
            entity_id: &num.to_string(),
            description: &format!("{} removed", rec.key()),
        },
    );

    Ok(())
}

pub fn list(pool: &mut DbPool, filter: &AttendanceFilter) -> AppResult<Vec<AttendanceRecord>> {
    queries::list_records(&pool.conn, filter)
}
