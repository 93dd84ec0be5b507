//! SQLite connection wrapper (one connection per CLI invocation).

use crate::config::{Config, default_busy_timeout};
use crate::db::initialize::init_db;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the database file and make sure the schema is current.
    pub fn new(path: &str) -> AppResult<Self> {
        Self::with_timeout(path, Duration::from_millis(default_busy_timeout()))
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Self::with_timeout(&cfg.database, Duration::from_millis(cfg.busy_timeout_ms))
    }

    pub fn with_timeout(path: &str, busy_timeout: Duration) -> AppResult<Self> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            return Err(AppError::StoreUnavailable(format!(
                "database directory does not exist: {}",
                parent.display()
            )));
        }

        let conn = Connection::open(Path::new(path))
            .map_err(|e| AppError::StoreUnavailable(format!("cannot open {path}: {e}")))?;
        conn.busy_timeout(busy_timeout)?;

        init_db(&conn)?;
        Ok(Self { conn })
    }
}
