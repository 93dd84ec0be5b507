use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print: true, limit } = cmd {
        let mut pool = DbPool::from_config(cfg)?;
        LogLogic::print_log(&mut pool, *limit)?;
    }

    Ok(())
}
