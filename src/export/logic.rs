// src/export/logic.rs

use crate::core::aggregate::{aggregate, report};
use crate::db::log::{AuditEvent, audit_or_warn};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{DetailExport, SummaryExport};
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ExportKind, notify_export_success};
use crate::models::AttendanceFilter;
use crate::ui::messages::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Output settings that do not affect which rows are selected.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub pdf_row_height: f32,
    /// Overrides the title derived from the filter.
    pub title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pdf_row_height: 20.0,
            title: None,
        }
    }
}

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Render the selected records as a byte stream.
    ///
    /// `Detail` rows are sorted by date; `Summary` rows are one per
    /// (student, classroom) pair.
    pub fn render(
        pool: &mut DbPool,
        filter: &AttendanceFilter,
        kind: ExportKind,
        format: ExportFormat,
        opts: &RenderOptions,
    ) -> AppResult<Vec<u8>> {
        let title = opts
            .title
            .clone()
            .unwrap_or_else(|| build_pdf_title(filter, kind));

        match kind {
            ExportKind::Detail => {
                let rep = report(pool, filter)?;
                let rows: Vec<DetailExport> = rep.details.iter().map(DetailExport::from).collect();

                match format {
                    ExportFormat::Csv => export_csv(&rows),
                    ExportFormat::Json => export_json(&rows),
                    ExportFormat::Xlsx => export_xlsx(&rows, "Attendance"),
                    ExportFormat::Pdf => {
                        let totals = format!(
                            "Total: {}    Present: {}    Absent: {}    Attendance %: {:.2} %",
                            rep.total, rep.present, rep.absent, rep.attendance_percent
                        );
                        Ok(export_pdf(&rows, &title, Some(&totals), opts.pdf_row_height))
                    }
                }
            }
            ExportKind::Summary => {
                let summary = aggregate(pool, filter)?;
                let rows: Vec<SummaryExport> = summary.iter().map(SummaryExport::from).collect();

                match format {
                    ExportFormat::Csv => export_csv(&rows),
                    ExportFormat::Json => export_json(&rows),
                    ExportFormat::Xlsx => export_xlsx(&rows, "Summary"),
                    ExportFormat::Pdf => {
                        let sub = format!("Student/classroom pairs: {}", rows.len());
                        Ok(export_pdf(&rows, &title, Some(&sub), opts.pdf_row_height))
                    }
                }
            }
        }
    }

    /// Render and write to `file`, which must be an absolute path.
    #[allow(clippy::too_many_arguments)]
    pub fn export(
        pool: &mut DbPool,
        filter: &AttendanceFilter,
        kind: ExportKind,
        format: ExportFormat,
        file: &Path,
        force: bool,
        opts: &RenderOptions,
        actor: Option<&str>,
    ) -> AppResult<PathBuf> {
        if !file.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {}",
                file.display()
            )));
        }

        ensure_writable(file, force)?;

        info(format!(
            "Exporting to {}: {}",
            format.label(),
            file.display()
        ));

        let bytes = Self::render(pool, filter, kind, format, opts)?;
        fs::write(file, &bytes)?;

        notify_export_success(format.label(), file);

        audit_or_warn(
            &pool.conn,
            &AuditEvent {
                event_type: "export",
                user_id: actor,
                entity_type: "attendance",
                entity_id: "",
                description: &format!(
                    "{} {} → {}",
                    format.as_str(),
                    match kind {
                        ExportKind::Detail => "detail",
                        ExportKind::Summary => "summary",
                    },
                    file.display()
                ),
            },
        );

        Ok(file.to_path_buf())
    }
}

/// Report title for the active filter: student scope first, then classroom,
/// then generic; month or explicit bounds appended in parentheses.
pub fn build_pdf_title(filter: &AttendanceFilter, kind: ExportKind) -> String {
    let base = match kind {
        ExportKind::Detail => "Attendance Report",
        ExportKind::Summary => "Attendance Summary",
    };

    let mut title = if let Some(s) = &filter.student_id {
        format!("{base}: Student {s}")
    } else if let Some(c) = &filter.classroom_id {
        format!("{base}: Class {c}")
    } else {
        base.to_string()
    };

    if let Some(m) = &filter.month {
        title.push_str(&format!(" ({m})"));
    } else {
        match (filter.date_from, filter.date_to) {
            (Some(f), Some(t)) if f == t => title.push_str(&format!(" ({f})")),
            (Some(f), Some(t)) => title.push_str(&format!(" (from {f} to {t})")),
            (Some(f), None) => title.push_str(&format!(" (from {f})")),
            (None, Some(t)) => title.push_str(&format!(" (until {t})")),
            (None, None) => {}
        }
    }

    title
}
