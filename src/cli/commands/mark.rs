use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::record;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceStatus, Candidate};
use crate::ui::messages::success;
use serde_json::Value;

/// Strict parse of a `--status` argument. Batch rows are lenient, a typo on
/// the command line is not.
pub(crate) fn parse_status_arg(raw: &str) -> AppResult<AttendanceStatus> {
    AttendanceStatus::parse(raw).ok_or_else(|| {
        AppError::field("status", format!("'{raw}' is not one of: present, absent"))
    })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Mark {
        student,
        classroom,
        date,
        status,
        absent,
        remarks,
        marked_by,
    } = cmd
    {
        let status = match status {
            Some(s) => parse_status_arg(s)?,
            None => AttendanceStatus::from_present_flag(!*absent),
        };

        let mut data = Candidate::new();
        data.insert("student_id".into(), Value::String(student.clone()));
        data.insert("classroom_id".into(), Value::String(classroom.clone()));
        data.insert("date".into(), Value::String(date.clone()));
        data.insert("status".into(), Value::String(status.to_string()));
        if let Some(r) = remarks {
            data.insert("remarks".into(), Value::String(r.clone()));
        }
        if let Some(by) = marked_by {
            data.insert("marked_by".into(), Value::String(by.clone()));
        }

        let mut pool = DbPool::from_config(cfg)?;
        let id = record::create(&mut pool, &data, cfg.default_user.as_deref())?;

        success(format!(
            "Marked {} {} in {} on {} (id {}).",
            student.trim(),
            status,
            classroom.trim(),
            date.trim(),
            id
        ));
    }

    Ok(())
}
