use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::{AuditEvent, audit_or_warn};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// Creates the config directory and file (skipped in test mode), the SQLite
/// database and its schema.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_str = db_path.to_string_lossy().to_string();

    info("Initializing rattendance…");
    if !cli.test {
        info(format!("Config file : {}", Config::config_file().display()));
    }
    info(format!("Database    : {}", db_str));

    // opening the pool creates tables and runs migrations
    let pool = DbPool::new(&db_str)?;

    audit_or_warn(
        &pool.conn,
        &AuditEvent {
            event_type: "init",
            user_id: cli.user.as_deref(),
            entity_type: "database",
            entity_id: "",
            description: &format!("Database initialized at {}", db_str),
        },
    );

    success(format!("Database initialized at {}", db_str));
    Ok(())
}
