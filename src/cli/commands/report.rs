use crate::cli::commands::list::records_table;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::{aggregate, report};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportKind, build_pdf_title};
use crate::models::AttendanceSummary;
use crate::ui::messages::header;
use crate::utils::colors::{RESET, color_for_percent, color_for_percent_cell};
use crate::utils::table::Table;

fn to_json<T: serde::Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Other(e.to_string()))
}

/// Per (student, classroom) totals, shared with `leaderboard`.
pub(crate) fn summary_table(rows: &[AttendanceSummary], cfg: &Config, ranked: bool) -> Table {
    let mut headers = vec!["STUDENT", "CLASSROOM", "DAYS", "PRESENT", "ABSENT", "%"];
    if ranked {
        headers.insert(0, "#");
    }
    let pct_col = headers.len() - 1;

    let mut table = Table::new(&headers)
        .separator(&cfg.separator_char)
        .color_column(pct_col, color_for_percent_cell);

    for (i, s) in rows.iter().enumerate() {
        let mut row = vec![
            s.student_id.clone(),
            s.classroom_id.clone(),
            s.total_days.to_string(),
            s.present_days.to_string(),
            s.absent_days.to_string(),
            format!("{:.2}", s.attendance_percent),
        ];
        if ranked {
            row.insert(0, (i + 1).to_string());
        }
        table.add_row(row);
    }

    table
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        filter,
        summary,
        json,
    } = cmd
    {
        let filter = filter.to_filter()?;
        let mut pool = DbPool::from_config(cfg)?;

        if *summary {
            let rows = aggregate(&mut pool, &filter)?;

            if *json {
                println!("{}", to_json(&rows)?);
                return Ok(());
            }

            header(build_pdf_title(&filter, ExportKind::Summary));
            if rows.is_empty() {
                println!("No attendance records match the given filters.");
            } else {
                print!("{}", summary_table(&rows, cfg, false).render());
            }
            return Ok(());
        }

        let rep = report(&mut pool, &filter)?;

        if *json {
            println!("{}", to_json(&rep)?);
            return Ok(());
        }

        header(build_pdf_title(&filter, ExportKind::Detail));
        if !rep.details.is_empty() {
            print!("{}", records_table(&rep.details, cfg).render());
            println!();
        }

        println!(
            "Total: {}   Present: {}   Absent: {}   Attendance: {}{:.2} %{}",
            rep.total,
            rep.present,
            rep.absent,
            color_for_percent(rep.attendance_percent),
            rep.attendance_percent,
            RESET
        );
    }

    Ok(())
}
