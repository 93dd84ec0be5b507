mod common;
use common::{locked_pool, open_pool, row};
use rattendance::core::upsert::UpsertEngine;
use rattendance::db::queries::{find_by_key, list_records};
use rattendance::errors::AppError;
use rattendance::models::{AttendanceFilter, AttendanceKey, AttendanceStatus};
use chrono::NaiveDate;
use serde_json::json;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_same_batch_twice_keeps_one_row_per_key() {
    let mut pool = open_pool("upsert_idempotent");

    let batch = vec![
        row(json!({"student_id": "S1", "classroom_id": "C1", "date": "2025-01-10", "status": "present"})),
        row(json!({"student_id": "S2", "classroom_id": "C1", "date": "2025-01-10", "status": "absent"})),
    ];

    let first = UpsertEngine::upsert_batch(&mut pool, &batch, None).unwrap();
    assert_eq!(first.applied, 2);

    let key = AttendanceKey::new("S1", "C1", day("2025-01-10"));
    let before = find_by_key(&pool.conn, &key).unwrap().unwrap();

    let second = UpsertEngine::upsert_batch(&mut pool, &batch, None).unwrap();
    assert_eq!(second.applied, 2);
    assert!(second.is_clean());

    let after = find_by_key(&pool.conn, &key).unwrap().unwrap();
    assert_eq!(before.id, after.id);
    assert_eq!(before.created_at, after.created_at);
    assert!(after.updated_at > before.updated_at);

    let all = list_records(&pool.conn, &AttendanceFilter::new()).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_last_row_in_batch_wins() {
    let mut pool = open_pool("upsert_last_wins");

    let batch = vec![
        row(json!({"student_id": "S1", "classroom_id": "C1", "date": "2025-01-10", "status": "present"})),
        row(json!({"student_id": "S1", "classroom_id": "C1", "date": "2025-01-10", "status": "absent", "remarks": "left early"})),
    ];

    let outcome = UpsertEngine::upsert_batch(&mut pool, &batch, None).unwrap();
    assert_eq!(outcome.applied, 2);

    let all = list_records(&pool.conn, &AttendanceFilter::new()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, AttendanceStatus::Absent);
    assert_eq!(all[0].remarks.as_deref(), Some("left early"));
}

#[test]
fn test_rows_missing_key_fields_are_skipped() {
    let mut pool = open_pool("upsert_skip");

    let batch = vec![
        row(json!({"student_id": "S1", "classroom_id": "C1", "date": "2025-01-10"})),
        row(json!({"student_id": "S2", "classroom_id": "C1", "date": "2025-01-10"})),
        row(json!({"student_id": "S3", "date": "2025-01-10"})),
        row(json!({"student_id": "S4", "classroom_id": "C1", "date": "2025-01-10"})),
        row(json!({"student_id": "S5", "classroom_id": "C1", "date": "2025-01-10"})),
    ];

    let outcome = UpsertEngine::upsert_batch(&mut pool, &batch, None).unwrap();

    assert_eq!(outcome.applied, 4);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].index, 2);
    assert_eq!(outcome.skipped[0].missing, vec!["classroom_id"]);
    assert!(outcome.failed.is_empty());
}

#[test]
fn test_blank_and_null_key_fields_count_as_missing() {
    let mut pool = open_pool("upsert_blank_keys");

    let batch = vec![
        row(json!({"student_id": "  ", "classroom_id": null, "date": "2025-01-10"})),
        row(json!({"studentId": "S1", "classroomId": "C1", "date": "2025-01-10"})),
    ];

    let outcome = UpsertEngine::upsert_batch(&mut pool, &batch, None).unwrap();

    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.skipped[0].missing, vec!["student_id", "classroom_id"]);
}

#[test]
fn test_invalid_date_is_a_row_failure_not_an_abort() {
    let mut pool = open_pool("upsert_bad_date");

    let batch = vec![
        row(json!({"student_id": "S1", "classroom_id": "C1", "date": "2025-13-01"})),
        row(json!({"student_id": "S2", "classroom_id": "C1", "date": "2025-01-10"})),
    ];

    let outcome = UpsertEngine::upsert_batch(&mut pool, &batch, None).unwrap();

    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].index, 0);
    assert_eq!(outcome.total(), 2);
}

#[test]
fn test_status_normalization() {
    let mut pool = open_pool("upsert_normalize");

    let batch = vec![
        row(json!({"student_id": "A", "classroom_id": "C1", "date": "2025-01-10", "present": false})),
        row(json!({"student_id": "B", "classroom_id": "C1", "date": "2025-01-10", "status": "PRESENT"})),
        row(json!({"student_id": "C", "classroom_id": "C1", "date": "2025-01-10", "present": "no"})),
        row(json!({"student_id": "D", "classroom_id": "C1", "date": "2025-01-10", "present": 0})),
        row(json!({"student_id": "E", "classroom_id": "C1", "date": "2025-01-10", "status": "late"})),
        row(json!({"student_id": "F", "classroom_id": "C1", "date": "2025-01-10"})),
        row(json!({"student_id": "G", "classroom_id": "C1", "date": "2025-01-10", "status": "Absent", "present": true})),
    ];

    UpsertEngine::upsert_batch(&mut pool, &batch, None).unwrap();

    let expected = [
        ("A", AttendanceStatus::Absent),
        ("B", AttendanceStatus::Present),
        ("C", AttendanceStatus::Absent),
        ("D", AttendanceStatus::Absent),
        ("E", AttendanceStatus::Present),
        ("F", AttendanceStatus::Present),
        ("G", AttendanceStatus::Absent),
    ];

    for (student, status) in expected {
        let key = AttendanceKey::new(student, "C1", day("2025-01-10"));
        let rec = find_by_key(&pool.conn, &key).unwrap().unwrap();
        assert_eq!(rec.status, status, "student {student}");
    }
}

#[test]
fn test_marked_by_override_replaces_row_value() {
    let mut pool = open_pool("upsert_marked_by");

    let batch = vec![
        row(json!({"student_id": "S1", "classroom_id": "C1", "date": "2025-01-10", "marked_by": "someone"})),
        row(json!({"student_id": "S2", "classroom_id": "C1", "date": "2025-01-10", "markedBy": "other"})),
    ];

    UpsertEngine::upsert_batch(&mut pool, &batch, Some("staff-7")).unwrap();

    let all = list_records(&pool.conn, &AttendanceFilter::new()).unwrap();
    assert!(all.iter().all(|r| r.marked_by.as_deref() == Some("staff-7")));

    // without an override the row's own author is kept
    UpsertEngine::upsert_batch(&mut pool, &batch, Some("   ")).unwrap();
    let key = AttendanceKey::new("S2", "C1", day("2025-01-10"));
    let rec = find_by_key(&pool.conn, &key).unwrap().unwrap();
    assert_eq!(rec.marked_by.as_deref(), Some("other"));
}

#[test]
fn test_numeric_ids_are_stored_as_text() {
    let mut pool = open_pool("upsert_numeric_ids");

    let batch = vec![row(json!({"student_id": 42, "classroom_id": 7, "date": "2025-01-10"}))];
    let outcome = UpsertEngine::upsert_batch(&mut pool, &batch, None).unwrap();
    assert_eq!(outcome.applied, 1);

    let key = AttendanceKey::new("42", "7", day("2025-01-10"));
    assert!(find_by_key(&pool.conn, &key).unwrap().is_some());
}

#[test]
fn test_empty_batch_is_a_no_op() {
    let mut pool = open_pool("upsert_empty");
    let outcome = UpsertEngine::upsert_batch(&mut pool, &[], None).unwrap();
    assert_eq!(outcome.total(), 0);
    assert!(outcome.is_clean());
}

#[test]
fn test_locked_store_aborts_the_whole_batch() {
    let (mut pool, lock) = locked_pool("upsert_locked");

    let batch = vec![
        row(json!({"student_id": "S1", "classroom_id": "C1", "date": "2025-01-10"})),
        row(json!({"student_id": "S2", "classroom_id": "C1", "date": "2025-01-10"})),
    ];

    let result = UpsertEngine::upsert_batch(&mut pool, &batch, None);
    assert!(matches!(result, Err(AppError::StoreUnavailable(_))));

    lock.execute_batch("ROLLBACK;").unwrap();
    drop(lock);

    let all = list_records(&pool.conn, &AttendanceFilter::new()).unwrap();
    assert!(all.is_empty());
}

#[test]
fn test_object_or_array_ids_are_invalid_rows() {
    let mut pool = open_pool("upsert_structured_ids");

    let batch = vec![
        row(json!({"student_id": {"x": 1}, "classroom_id": "C1", "date": "2025-01-10"})),
        row(json!({"student_id": "S1", "classroom_id": [1], "date": "2025-01-10"})),
        row(json!({"student_id": "S2", "classroom_id": "C1", "date": "2025-01-10"})),
    ];

    let outcome = UpsertEngine::upsert_batch(&mut pool, &batch, None).unwrap();

    assert_eq!(outcome.applied, 1);
    assert!(outcome.skipped.is_empty());
    assert_eq!(outcome.failed.len(), 2);
    assert!(outcome.failed[0].reason.contains("student_id"));
    assert!(outcome.failed[1].reason.contains("classroom_id"));

    let all = list_records(&pool.conn, &AttendanceFilter::new()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].student_id, "S2");
}
