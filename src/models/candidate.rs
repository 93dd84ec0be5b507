//! Loosely-typed attendance payloads (API bodies, CSV rows) and their
//! validation into strict records.
//!
//! The batch path skips rows that lack a key field, the single-record path
//! rejects them with per-field detail. Both share the extraction below.

use super::{key::AttendanceKey, status::AttendanceStatus};
use crate::errors::{AppError, AppResult, FieldError};
use crate::utils::date::parse_iso_date;
use serde_json::{Map, Value};

/// One raw row as received from a caller.
pub type Candidate = Map<String, Value>;

pub const STUDENT_ID: &str = "student_id";
pub const CLASSROOM_ID: &str = "classroom_id";
pub const DATE: &str = "date";

const STUDENT_KEYS: [&str; 2] = ["student_id", "studentId"];
const CLASSROOM_KEYS: [&str; 2] = ["classroom_id", "classroomId"];
const DATE_KEYS: [&str; 1] = ["date"];
const MARKED_BY_KEYS: [&str; 2] = ["marked_by", "markedBy"];
const REMARKS_KEYS: [&str; 1] = ["remarks"];

const KEY_FIELDS: [(&str, &[&str]); 3] = [
    (STUDENT_ID, &STUDENT_KEYS),
    (CLASSROOM_ID, &CLASSROOM_KEYS),
    (DATE, &DATE_KEYS),
];

const NOT_SCALAR: &str = "must be text or a number";

/// Read the first non-empty value among `names` as a trimmed string.
/// Numbers and booleans are rendered in their plain text form; objects and
/// arrays are never usable as text.
pub fn text_field(data: &Candidate, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| match data.get(*name)? {
        Value::String(s) => {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Object(_) | Value::Array(_) => None,
    })
}

fn holds_structure(data: &Candidate, names: &[&str]) -> bool {
    names
        .iter()
        .any(|name| matches!(data.get(*name), Some(Value::Object(_) | Value::Array(_))))
}

/// Key fields whose value is an object or an array.
fn structured_keys(data: &Candidate) -> Vec<&'static str> {
    KEY_FIELDS
        .iter()
        .filter(|(_, names)| holds_structure(data, names))
        .map(|(field, _)| *field)
        .collect()
}

/// Why a batch row was not turned into a `NewAttendance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIssue {
    /// One or more composite key fields are absent or empty.
    Missing(Vec<&'static str>),
    /// All key fields are there but at least one cannot be used.
    Invalid(String),
}

/// A validated attendance mark, ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub key: AttendanceKey,
    pub status: AttendanceStatus,
    pub marked_by: Option<String>,
    pub remarks: Option<String>,
}

impl NewAttendance {
    /// Batch-path conversion: missing key fields are reported as a skip,
    /// malformed values as an invalid row.
    pub fn from_batch_row(data: &Candidate) -> Result<Self, RowIssue> {
        let structured = structured_keys(data);
        if !structured.is_empty() {
            return Err(RowIssue::Invalid(format!(
                "{} {NOT_SCALAR}",
                structured.join(", ")
            )));
        }

        let student = text_field(data, &STUDENT_KEYS);
        let classroom = text_field(data, &CLASSROOM_KEYS);
        let date = text_field(data, &DATE_KEYS);

        let mut missing = Vec::new();
        if student.is_none() {
            missing.push(STUDENT_ID);
        }
        if classroom.is_none() {
            missing.push(CLASSROOM_ID);
        }
        if date.is_none() {
            missing.push(DATE);
        }

        match (student, classroom, date) {
            (Some(student), Some(classroom), Some(date)) => {
                let parsed = parse_iso_date(&date)
                    .ok_or_else(|| RowIssue::Invalid(format!("invalid date '{date}'")))?;
                Ok(Self::assemble(data, AttendanceKey::new(student, classroom, parsed)))
            }
            _ => Err(RowIssue::Missing(missing)),
        }
    }

    /// Single-record conversion: every problem is collected and the whole
    /// request is rejected.
    pub fn from_candidate(data: &Candidate) -> AppResult<Self> {
        let student = text_field(data, &STUDENT_KEYS);
        let classroom = text_field(data, &CLASSROOM_KEYS);
        let date_raw = text_field(data, &DATE_KEYS);

        let structured = structured_keys(data);
        let mut errors = Vec::new();
        for (field, value) in [(STUDENT_ID, &student), (CLASSROOM_ID, &classroom)] {
            if structured.contains(&field) {
                errors.push(FieldError::new(field, NOT_SCALAR));
            } else if value.is_none() {
                errors.push(FieldError::new(field, "field required"));
            }
        }

        let date = match date_raw {
            None if structured.contains(&DATE) => {
                errors.push(FieldError::new(DATE, NOT_SCALAR));
                None
            }
            None => {
                errors.push(FieldError::new(DATE, "field required"));
                None
            }
            Some(raw) => {
                let parsed = parse_iso_date(&raw);
                if parsed.is_none() {
                    errors.push(FieldError::new(
                        DATE,
                        format!("'{raw}' is not a YYYY-MM-DD date"),
                    ));
                }
                parsed
            }
        };

        match (student, classroom, date) {
            (Some(student), Some(classroom), Some(date)) if errors.is_empty() => {
                Ok(Self::assemble(data, AttendanceKey::new(student, classroom, date)))
            }
            _ => Err(AppError::Validation(errors)),
        }
    }

    fn assemble(data: &Candidate, key: AttendanceKey) -> Self {
        Self {
            key,
            status: AttendanceStatus::normalize(data),
            marked_by: text_field(data, &MARKED_BY_KEYS),
            remarks: text_field(data, &REMARKS_KEYS),
        }
    }
}

/// Partial update of a stored record. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendancePatch {
    pub status: Option<AttendanceStatus>,
    pub date: Option<chrono::NaiveDate>,
    pub marked_by: Option<String>,
    pub remarks: Option<String>,
}

impl AttendancePatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.date.is_none()
            && self.marked_by.is_none()
            && self.remarks.is_none()
    }

    pub fn from_candidate(data: &Candidate) -> AppResult<Self> {
        let status = (data.contains_key("status") || data.contains_key("present"))
            .then(|| AttendanceStatus::normalize(data));

        let date = match text_field(data, &DATE_KEYS) {
            None => None,
            Some(raw) => Some(parse_iso_date(&raw).ok_or_else(|| {
                AppError::field(DATE, format!("'{raw}' is not a YYYY-MM-DD date"))
            })?),
        };

        Ok(Self {
            status,
            date,
            marked_by: text_field(data, &MARKED_BY_KEYS),
            remarks: text_field(data, &REMARKS_KEYS),
        })
    }
}
