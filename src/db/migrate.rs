use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `audit_log` table exists.
fn ensure_audit_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS audit_log (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at  TEXT NOT NULL,
            event_type  TEXT NOT NULL,
            user_id     TEXT NOT NULL DEFAULT '',
            entity_type TEXT NOT NULL DEFAULT '',
            entity_id   TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_audit_log_created ON audit_log(created_at);
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `attendance` table with the current schema.
///
/// The composite UNIQUE constraint is what makes bulk marking idempotent.
fn create_attendance_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id    TEXT NOT NULL CHECK(length(student_id) > 0),
            classroom_id  TEXT NOT NULL CHECK(length(classroom_id) > 0),
            date          TEXT NOT NULL CHECK(length(date) = 10),
            status        TEXT NOT NULL DEFAULT 'present' CHECK(status IN ('present','absent')),
            marked_by     TEXT,
            remarks       TEXT,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL,
            deleted_at    TEXT,
            UNIQUE(student_id, classroom_id, date)
        );
        "#,
    )?;
    Ok(())
}

fn ensure_attendance_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance(date);
        CREATE INDEX IF NOT EXISTS idx_attendance_classroom_date ON attendance(classroom_id, date);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM audit_log
         WHERE event_type = 'migration_applied' AND entity_id = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration(conn: &Connection, version: &str, description: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO audit_log (created_at, event_type, user_id, entity_type, entity_id, description)
         VALUES (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'), 'migration_applied', 'system', 'schema', ?1, ?2)",
        [version, description],
    )?;
    Ok(())
}

/// Databases created before soft delete existed lack `deleted_at`.
fn migrate_add_deleted_at(conn: &Connection) -> Result<()> {
    let version = "20251104_0002_attendance_soft_delete";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !has_column(conn, "attendance", "deleted_at")? {
        warning("Adding 'deleted_at' column to attendance table...");
        conn.execute("ALTER TABLE attendance ADD COLUMN deleted_at TEXT;", [])?;
        success(format!(
            "Migration applied: {} → added 'deleted_at' to attendance table",
            version
        ));
    }

    mark_migration(conn, version, "Soft delete marker on attendance")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Audit table first, migrations are recorded there
    ensure_audit_table(conn)?;

    // 2) Attendance table
    if !table_exists(conn, "attendance")? {
        create_attendance_table(conn)?;
    }
    ensure_attendance_indexes(conn)?;

    // 3) Column additions
    migrate_add_deleted_at(conn)?;

    Ok(())
}

/// Run `PRAGMA integrity_check` and return the reported lines.
pub fn integrity_check(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA integrity_check;")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
