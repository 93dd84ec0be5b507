use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::import_file;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{detail, info, success, warning};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let path = expand_tilde(file);
        let mut pool = DbPool::from_config(cfg)?;

        info(format!("Importing attendance from {}", path.display()));
        let (source, outcome) = import_file(&mut pool, &path, cfg.default_user.as_deref())?;

        success(format!(
            "{} of {} row(s) applied.",
            outcome.applied,
            outcome.total()
        ));

        if !outcome.skipped.is_empty() {
            warning(format!("{} row(s) skipped:", outcome.skipped.len()));
            for s in &outcome.skipped {
                detail(format!(
                    "row {}: missing {}",
                    source.display_row(s.index),
                    s.missing.join(", ")
                ));
            }
        }

        if !outcome.failed.is_empty() {
            warning(format!("{} row(s) failed:", outcome.failed.len()));
            for f in &outcome.failed {
                detail(format!("row {}: {}", source.display_row(f.index), f.reason));
            }
        }
    }

    Ok(())
}
