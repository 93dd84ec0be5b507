use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::date::now_timestamp;
use rusqlite::{Connection, params};
use serde::Serialize;

/// One row of the `audit_log` table.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub id: i64,
    pub created_at: String,
    pub event_type: String,
    pub user_id: String,
    pub entity_type: String,
    pub entity_id: String,
    pub description: String,
}

/// What happened, by whom, to which entity.
#[derive(Debug, Clone, Copy)]
pub struct AuditEvent<'a> {
    pub event_type: &'a str,
    pub user_id: Option<&'a str>,
    pub entity_type: &'a str,
    pub entity_id: &'a str,
    pub description: &'a str,
}

/// Write an audit line into the `audit_log` table.
pub fn audit(conn: &Connection, ev: &AuditEvent) -> AppResult<()> {
    let now = now_timestamp();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO audit_log (created_at, event_type, user_id, entity_type, entity_id, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;

    stmt.execute(params![
        now,
        ev.event_type,
        ev.user_id.unwrap_or(""),
        ev.entity_type,
        ev.entity_id,
        ev.description
    ])?;

    Ok(())
}

/// Same as `audit`, but a failure only produces a warning.
pub fn audit_or_warn(conn: &Connection, ev: &AuditEvent) {
    if let Err(e) = audit(conn, ev) {
        warning(format!("Failed to write audit log: {}", e));
    }
}

/// Newest entries first.
pub fn load_audit(conn: &Connection, limit: usize) -> AppResult<Vec<AuditEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, created_at, event_type, user_id, entity_type, entity_id, description
         FROM audit_log
         ORDER BY id DESC
         LIMIT ?1",
    )?;

    let rows = stmt.query_map([limit as i64], |row| {
        Ok(AuditEntry {
            id: row.get(0)?,
            created_at: row.get(1)?,
            event_type: row.get(2)?,
            user_id: row.get(3)?,
            entity_type: row.get(4)?,
            entity_id: row.get(5)?,
            description: row.get(6)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
