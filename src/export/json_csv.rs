// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::ExportRow;
use serde::Serialize;

/// JSON pretty-printed.
pub(crate) fn export_json<T: Serialize>(rows: &[T]) -> AppResult<Vec<u8>> {
    serde_json::to_vec_pretty(rows)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))
}

/// CSV with header row, also when there is no data.
pub(crate) fn export_csv<T: ExportRow>(rows: &[T]) -> AppResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(T::headers())
        .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;

    for item in rows {
        wtr.write_record(item.to_row())
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))
}
