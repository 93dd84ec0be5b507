// src/export/pdf_export.rs

use crate::export::model::{ExportRow, rows_to_table};
use crate::export::pdf::PdfManager;

const MAX_CELL_CHARS: usize = 40;

/// Long free text would overflow its column; keep the first wrapped line.
fn fit_cell(cell: String) -> String {
    if cell.chars().count() <= MAX_CELL_CHARS {
        return cell;
    }
    let first = textwrap::wrap(&cell, MAX_CELL_CHARS - 3)
        .into_iter()
        .next()
        .map(|l| l.into_owned())
        .unwrap_or_default();
    format!("{first}...")
}

/// Render rows as a paginated PDF table.
pub(crate) fn export_pdf<T: ExportRow>(
    rows: &[T],
    title: &str,
    subtitle: Option<&str>,
    row_height: f32,
) -> Vec<u8> {
    let table: Vec<Vec<String>> = rows_to_table(rows)
        .into_iter()
        .map(|r| r.into_iter().map(fit_cell).collect())
        .collect();

    let mut pdf = PdfManager::new(row_height);
    pdf.write_table(title, subtitle, T::headers(), &table);
    pdf.finish()
}
