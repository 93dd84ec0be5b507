use crate::cli::commands::report::summary_table;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::leaderboard;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::header;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Leaderboard { filter, limit } = cmd {
        let filter = filter.to_filter()?;
        let limit = limit.unwrap_or(cfg.leaderboard_limit);

        let mut pool = DbPool::from_config(cfg)?;
        let rows = leaderboard(&mut pool, &filter, limit)?;

        header("Attendance leaderboard");
        if rows.is_empty() {
            println!("No attendance records match the given filters.");
        } else {
            print!("{}", summary_table(&rows, cfg, true).render());
        }
    }

    Ok(())
}
