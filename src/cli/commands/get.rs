use crate::cli::commands::list::records_table;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::record;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Get { id, json } = cmd {
        let mut pool = DbPool::from_config(cfg)?;

        let rec = record::get(&mut pool, id)?
            .ok_or_else(|| AppError::NotFound(format!("attendance record '{id}'")))?;

        if *json {
            let out =
                serde_json::to_string_pretty(&rec).map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
        } else {
            print!("{}", records_table(std::slice::from_ref(&rec), cfg).render());
            println!("\ncreated {}  updated {}", rec.created_at, rec.updated_at);
        }
    }

    Ok(())
}
