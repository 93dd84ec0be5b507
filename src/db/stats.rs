use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) RECORD COUNTS
    //
    let live: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM attendance WHERE deleted_at IS NULL",
        [],
        |row| row.get(0),
    )?;
    let deleted: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM attendance WHERE deleted_at IS NOT NULL",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Attendance records:{} {}{}{} ({} soft-deleted)",
        CYAN, RESET, GREEN, live, RESET, deleted
    );

    let (students, classrooms): (i64, i64) = pool.conn.query_row(
        "SELECT COUNT(DISTINCT student_id), COUNT(DISTINCT classroom_id)
         FROM attendance WHERE deleted_at IS NULL",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    println!("{}• Students:{} {}", CYAN, RESET, students);
    println!("{}• Classrooms:{} {}", CYAN, RESET, classrooms);

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT MIN(date) FROM attendance WHERE deleted_at IS NULL",
            [],
            |row| row.get(0),
        )
        .optional()?
        .flatten();

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT MAX(date) FROM attendance WHERE deleted_at IS NULL",
            [],
            |row| row.get(0),
        )
        .optional()?
        .flatten();

    println!("{}• Date range:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    //
    // 4) AUDIT
    //
    let audit: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM audit_log", [], |row| row.get(0))?;
    println!("{}• Audit entries:{} {}", CYAN, RESET, audit);

    println!();
    Ok(())
}
