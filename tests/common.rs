#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rattendance::db::pool::DbPool;
use rattendance::models::Candidate;
use serde_json::Value;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Binary under test, isolated from the user's configuration directory.
pub fn rat() -> Command {
    let mut cmd = cargo_bin_cmd!("rattendance");
    cmd.env(rattendance::config::HOME_ENV, test_home());
    cmd
}

fn test_home() -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push("rattendance_test_home");
    fs::create_dir_all(&path).ok();
    path.to_string_lossy().to_string()
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh library-level store.
pub fn open_pool(name: &str) -> DbPool {
    let db_path = setup_test_db(name);
    DbPool::new(&db_path).expect("open db")
}

/// Store opened with a 1 ms busy timeout, then locked by a second connection
/// holding an exclusive transaction. Keep the returned connection alive for
/// as long as the lock should hold.
pub fn locked_pool(name: &str) -> (DbPool, rusqlite::Connection) {
    let db_path = setup_test_db(name);
    let pool = DbPool::with_timeout(&db_path, Duration::from_millis(1)).expect("open db");

    let other = rusqlite::Connection::open(&db_path).expect("second connection");
    other.execute_batch("BEGIN EXCLUSIVE;").expect("exclusive lock");
    (pool, other)
}

/// Build a candidate row from a JSON object literal.
pub fn row(v: Value) -> Candidate {
    v.as_object().expect("object literal").clone()
}

/// Initialize DB through the CLI and mark a small dataset:
/// S1 in C1 on 2025-09-01 (present) and 2025-09-02 (absent),
/// S2 in C1 on 2025-09-01 (present).
pub fn init_db_with_data(db_path: &str) {
    rat()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (student, date, absent) in [
        ("S1", "2025-09-01", false),
        ("S1", "2025-09-02", true),
        ("S2", "2025-09-01", false),
    ] {
        let mut args = vec!["--db", db_path, "mark", student, "C1", date];
        if absent {
            args.push("--absent");
        }
        rat().args(&args).assert().success();
    }
}
