use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn).map_err(|e| match e {
        rusqlite::Error::SqliteFailure(..) if crate::errors::is_store_unavailable(&e) => {
            AppError::StoreUnavailable(e.to_string())
        }
        other => AppError::Migration(other.to_string()),
    })
}
