use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::record;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::AttendanceRecord;
use crate::utils::colors::{color_for_status, colorize_optional};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { filter, json } = cmd {
        let filter = filter.to_filter()?;
        let mut pool = DbPool::from_config(cfg)?;

        let records = record::list(&mut pool, &filter)?;

        if *json {
            let out = serde_json::to_string_pretty(&records)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
            return Ok(());
        }

        if records.is_empty() {
            println!("No attendance records match the given filters.");
            return Ok(());
        }

        print!("{}", records_table(&records, cfg).render());
        println!("\n{} record(s)", records.len());
    }
    Ok(())
}

/// Tabular view of records shared by `list`, `get` and `report`.
pub(crate) fn records_table(records: &[AttendanceRecord], cfg: &Config) -> Table {
    let mut table = Table::new(&[
        "ID",
        "DATE",
        "STUDENT",
        "CLASSROOM",
        "STATUS",
        "MARKED BY",
        "REMARKS",
    ])
    .separator(&cfg.separator_char)
    .color_column(4, color_for_status);

    for r in records {
        table.add_row(vec![
            r.id.to_string(),
            r.date_str(),
            r.student_id.clone(),
            r.classroom_id.clone(),
            r.status.to_string(),
            colorize_optional(r.marked_by.as_deref().unwrap_or("--")),
            colorize_optional(r.remarks.as_deref().unwrap_or("--")),
        ]);
    }

    table
}
