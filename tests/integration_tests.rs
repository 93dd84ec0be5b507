mod common;
use common::{init_db_with_data, rat, setup_test_db, temp_out};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    rat()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_mark_and_list() {
    let db_path = setup_test_db("cli_mark_list");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "list", "--student", "S1"])
        .assert()
        .success()
        .stdout(contains("2025-09-01"))
        .stdout(contains("2025-09-02"))
        .stdout(contains("2 record(s)"));

    rat()
        .args(["--db", &db_path, "list", "--from", "2025-09-02", "--to", "2025-09-02"])
        .assert()
        .success()
        .stdout(contains("1 record(s)"));
}

#[test]
fn test_mark_twice_is_rejected() {
    let db_path = setup_test_db("cli_mark_dup");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "mark", "S1", "C1", "2025-09-01"])
        .assert()
        .failure()
        .stderr(contains("already recorded"));
}

#[test]
fn test_mark_rejects_bad_input() {
    let db_path = setup_test_db("cli_mark_bad");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "mark", "S1", "C1", "2025-02-30"])
        .assert()
        .failure()
        .stderr(contains("date"));

    rat()
        .args(["--db", &db_path, "mark", "S1", "C1", "2025-09-05", "--status", "sick"])
        .assert()
        .failure()
        .stderr(contains("status"));
}

#[test]
fn test_marked_by_comes_from_user() {
    let db_path = setup_test_db("cli_marked_by");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "--user", "t-9", "mark", "S3", "C2", "2025-09-03"])
        .assert()
        .success();

    rat()
        .args(["--db", &db_path, "list", "--classroom", "C2", "--json"])
        .assert()
        .success()
        .stdout(contains("\"marked_by\": \"t-9\""));
}

#[test]
fn test_get_update_del() {
    let db_path = setup_test_db("cli_get_update_del");
    init_db_with_data(&db_path);

    // ids follow insertion order in a fresh database
    rat()
        .args(["--db", &db_path, "get", "1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"student_id\": \"S1\""))
        .stdout(contains("\"status\": \"present\""));

    rat()
        .args(["--db", &db_path, "update", "1", "--status", "absent", "--remarks", "late bus"])
        .assert()
        .success();

    rat()
        .args(["--db", &db_path, "get", "1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"status\": \"absent\""))
        .stdout(contains("late bus"));

    rat()
        .args(["--db", &db_path, "del", "1", "--yes"])
        .assert()
        .success();

    rat()
        .args(["--db", &db_path, "get", "1"])
        .assert()
        .failure()
        .stderr(contains("Not found"));

    rat()
        .args(["--db", &db_path, "get", "abc"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_del_without_confirmation_keeps_record() {
    let db_path = setup_test_db("cli_del_cancel");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "del", "2", "--hard"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("cancelled"));

    rat()
        .args(["--db", &db_path, "get", "2"])
        .assert()
        .success();
}

#[test]
fn test_report_and_summary() {
    let db_path = setup_test_db("cli_report");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "report", "--student", "S1", "--month", "2025-09"])
        .assert()
        .success()
        .stdout(contains("Attendance Report: Student S1 (2025-09)"))
        .stdout(contains("Total: 2"))
        .stdout(contains("50.00"));

    rat()
        .args(["--db", &db_path, "report", "--summary", "--json"])
        .assert()
        .success()
        .stdout(contains("\"attendance_percent\": 100.0"))
        .stdout(contains("\"attendance_percent\": 50.0"));
}

#[test]
fn test_leaderboard_ranks_best_first() {
    let db_path = setup_test_db("cli_leaderboard");
    init_db_with_data(&db_path);

    let out = rat()
        .args(["--db", &db_path, "leaderboard"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);

    let s2 = text.find("S2").expect("S2 listed");
    let s1 = text.find("S1").expect("S1 listed");
    assert!(s2 < s1);
}

#[test]
fn test_import_csv_reports_skipped_rows() {
    let db_path = setup_test_db("cli_import_csv");
    init_db_with_data(&db_path);

    let file = temp_out("cli_import_csv", "csv");
    fs::write(
        &file,
        "student_id,classroom_id,date,status,remarks\n\
         S1,C1,2025-09-03,present,\n\
         S2,C1,2025-09-03,absent,sick\n\
         S3,,2025-09-03,present,\n\
         S4,C1,2025-09-03,present,\n\
         S1,C1,2025-09-01,absent,corrected\n",
    )
    .unwrap();

    rat()
        .args(["--db", &db_path, "import", "--file", &file])
        .assert()
        .success()
        .stdout(contains("4 of 5 row(s) applied"))
        .stdout(contains("row 4: missing classroom_id"));

    // the corrected row replaced the earlier mark instead of adding one
    rat()
        .args(["--db", &db_path, "list", "--student", "S1"])
        .assert()
        .success()
        .stdout(contains("3 record(s)"))
        .stdout(contains("corrected"));
}

#[test]
fn test_import_json_twice_is_idempotent() {
    let db_path = setup_test_db("cli_import_json");
    rat()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let file = temp_out("cli_import_json", "json");
    fs::write(
        &file,
        r#"[
            {"studentId": "S1", "classroomId": "C1", "date": "2025-10-01", "present": true},
            {"studentId": "S1", "classroomId": "C1", "date": "2025-10-02", "present": false}
        ]"#,
    )
    .unwrap();

    for _ in 0..2 {
        rat()
            .args(["--db", &db_path, "import", "--file", &file])
            .assert()
            .success()
            .stdout(contains("2 of 2 row(s) applied"));
    }

    rat()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("2 record(s)"));
}

#[test]
fn test_import_rejects_unknown_extension() {
    let db_path = setup_test_db("cli_import_ext");
    init_db_with_data(&db_path);

    let file = temp_out("cli_import_ext", "txt");
    fs::write(&file, "whatever").unwrap();

    rat()
        .args(["--db", &db_path, "import", "--file", &file])
        .assert()
        .failure()
        .stderr(contains("unsupported file type"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("create"))
        .stdout(contains("init"));
}

#[test]
fn test_db_check_and_info() {
    let db_path = setup_test_db("cli_db");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "db", "--check", "--info"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_missing_db_directory_is_store_unavailable() {
    let mut path = std::env::temp_dir();
    path.push("rattendance_no_such_dir");
    path.push("db.sqlite");
    let db_path = path.to_string_lossy().to_string();

    rat()
        .args(["--db", &db_path, "list"])
        .assert()
        .failure()
        .stderr(contains("Store unavailable"));
}

#[test]
fn test_config_check_and_migrate_fill_missing_keys() {
    let mut home = std::env::temp_dir();
    home.push("rattendance_cfg_migrate_home");
    fs::create_dir_all(&home).unwrap();
    let conf = home.join("rattendance.conf");
    fs::write(&conf, "database: /tmp/x.sqlite\ncustom_key: kept\n").unwrap();

    rat()
        .env(rattendance::config::HOME_ENV, &home)
        .args(["config", "--check"])
        .assert()
        .success()
        .stdout(contains("busy_timeout_ms"));

    rat()
        .env(rattendance::config::HOME_ENV, &home)
        .args(["config", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Added"));

    let content = fs::read_to_string(&conf).unwrap();
    assert!(content.contains("custom_key: kept"));
    assert!(content.contains("pdf_row_height"));

    rat()
        .env(rattendance::config::HOME_ENV, &home)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("database: /tmp/x.sqlite"));
}

#[test]
fn test_import_reports_bad_row_once_with_file_row_number() {
    let db_path = setup_test_db("cli_import_row_numbers");
    init_db_with_data(&db_path);

    let file = temp_out("cli_import_row_numbers", "csv");
    fs::write(
        &file,
        "student_id,classroom_id,date,status\n\
         S1,C1,2025-13-40,present\n\
         S2,C1,2025-09-05,present\n",
    )
    .unwrap();

    rat()
        .args(["--db", &db_path, "import", "--file", &file])
        .assert()
        .success()
        .stdout(contains("1 of 2 row(s) applied"))
        .stdout(contains("row 2: invalid date '2025-13-40'"))
        .stdout(contains("Row 1").not());
}
