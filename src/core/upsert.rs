use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult, is_store_unavailable};
use crate::models::{AttendanceKey, Candidate, NewAttendance, RowIssue};
use serde::Serialize;

/// A batch row left out because part of its natural key is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub index: usize,
    pub missing: Vec<&'static str>,
}

/// A batch row that had a full key but could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    pub index: usize,
    pub key: Option<AttendanceKey>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    /// Rows inserted or updated.
    pub applied: usize,
    pub skipped: Vec<SkippedRow>,
    pub failed: Vec<RowFailure>,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.applied + self.skipped.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }
}

/// Idempotent bulk marking keyed on (student, classroom, date).
pub struct UpsertEngine;

impl UpsertEngine {
    /// Apply `candidates` in order; a later row for the same key wins.
    ///
    /// `marked_by_override` replaces any per-row `marked_by`. Rows missing a
    /// key field are skipped, rows that fail to apply are returned in
    /// `failed` and excluded from `applied`; presenting them is left to the
    /// caller, which knows how indexes map to source rows. Only an
    /// unavailable store aborts the batch.
    pub fn upsert_batch(
        pool: &mut DbPool,
        candidates: &[Candidate],
        marked_by_override: Option<&str>,
    ) -> AppResult<BatchOutcome> {
        let marked_by_override = marked_by_override
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let mut outcome = BatchOutcome::default();

        for (index, candidate) in candidates.iter().enumerate() {
            let mut entry = match NewAttendance::from_batch_row(candidate) {
                Ok(entry) => entry,
                Err(RowIssue::Missing(missing)) => {
                    outcome.skipped.push(SkippedRow { index, missing });
                    continue;
                }
                Err(RowIssue::Invalid(reason)) => {
                    outcome.failed.push(RowFailure {
                        index,
                        key: None,
                        reason,
                    });
                    continue;
                }
            };

            if let Some(by) = marked_by_override {
                entry.marked_by = Some(by.to_string());
            }

            match queries::upsert(&pool.conn, &entry) {
                Ok(_) => outcome.applied += 1,
                Err(e) if is_store_unavailable(&e) => {
                    return Err(AppError::StoreUnavailable(e.to_string()));
                }
                Err(e) => {
                    outcome.failed.push(RowFailure {
                        index,
                        key: Some(entry.key),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(outcome)
    }
}
