use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::record;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, hard, yes } = cmd {
        if !*yes {
            let prompt = if *hard {
                format!("Permanently remove record {}? This action is irreversible.", id)
            } else {
                format!("Delete record {}?", id)
            };

            if !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        let mut pool = DbPool::from_config(cfg)?;
        record::delete(&mut pool, id, *hard, cfg.default_user.as_deref())?;

        if *hard {
            success(format!("Record {} has been permanently removed.", id));
        } else {
            success(format!("Record {} has been deleted.", id));
        }
    }

    Ok(())
}
