//! Bulk attendance import from CSV or JSON files.

use crate::core::upsert::{BatchOutcome, UpsertEngine};
use crate::db::log::{AuditEvent, audit_or_warn};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::Candidate;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSource {
    Csv,
    Json,
}

impl ImportSource {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("csv") => Ok(ImportSource::Csv),
            Some("json") => Ok(ImportSource::Json),
            _ => Err(AppError::Import(format!(
                "unsupported file type: {} (expected .csv or .json)",
                path.display()
            ))),
        }
    }

    /// Number shown to users for the row at `index`; CSV counts the header line.
    pub fn display_row(&self, index: usize) -> usize {
        match self {
            ImportSource::Csv => index + 2,
            ImportSource::Json => index + 1,
        }
    }
}

/// Read CSV rows into candidates; every cell becomes a string value keyed by its header.
pub fn read_csv<R: Read>(reader: R) -> AppResult<Vec<Candidate>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| AppError::Import(format!("CSV header error: {e}")))?
        .clone();

    let mut out = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| AppError::Import(format!("CSV read error: {e}")))?;

        let mut row = Candidate::new();
        for (name, value) in headers.iter().zip(record.iter()) {
            row.insert(name.to_string(), Value::String(value.to_string()));
        }
        out.push(row);
    }

    Ok(out)
}

/// Read a JSON array of objects into candidates.
pub fn read_json(bytes: &[u8]) -> AppResult<Vec<Candidate>> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::Import(format!("JSON parse error: {e}")))?;

    let Value::Array(items) = value else {
        return Err(AppError::Import("JSON input must be an array of objects".into()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(AppError::Import(format!("JSON item {} is not an object", i + 1))),
        })
        .collect()
}

pub fn read_file(path: &Path) -> AppResult<(ImportSource, Vec<Candidate>)> {
    let source = ImportSource::from_path(path)?;
    let rows = match source {
        ImportSource::Csv => read_csv(fs::File::open(path)?)?,
        ImportSource::Json => read_json(&fs::read(path)?)?,
    };
    Ok((source, rows))
}

/// Load `path` and mark every row, with `actor` as the marking user.
pub fn import_file(
    pool: &mut DbPool,
    path: &Path,
    actor: Option<&str>,
) -> AppResult<(ImportSource, BatchOutcome)> {
    let (source, rows) = read_file(path)?;
    let outcome = UpsertEngine::upsert_batch(pool, &rows, actor)?;

    audit_or_warn(
        &pool.conn,
        &AuditEvent {
            event_type: "import",
            user_id: actor,
            entity_type: "attendance",
            entity_id: "",
            description: &format!(
                "{}: {} applied, {} skipped, {} failed",
                path.display(),
                outcome.applied,
                outcome.skipped.len(),
                outcome.failed.len()
            ),
        },
    );

    Ok((source, outcome))
}
