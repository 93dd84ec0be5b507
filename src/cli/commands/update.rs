use crate::cli::commands::mark::parse_status_arg;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::record;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::AttendancePatch;
use crate::ui::messages::success;
use crate::utils::date::parse_iso_date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Update {
        id,
        status,
        date,
        remarks,
        marked_by,
    } = cmd
    {
        let patch = AttendancePatch {
            status: status.as_deref().map(parse_status_arg).transpose()?,
            date: date
                .as_deref()
                .map(|d| {
                    parse_iso_date(d).ok_or_else(|| {
                        AppError::field("date", format!("'{d}' is not a YYYY-MM-DD date"))
                    })
                })
                .transpose()?,
            marked_by: marked_by.clone(),
            remarks: remarks.clone(),
        };

        let mut pool = DbPool::from_config(cfg)?;
        let rec = record::update(&mut pool, id, &patch, cfg.default_user.as_deref())?;

        success(format!(
            "Record {} updated: {} is {}.",
            rec.id,
            rec.key(),
            rec.status
        ));
    }

    Ok(())
}
