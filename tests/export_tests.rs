mod common;
use common::{init_db_with_data, open_pool, rat, row, setup_test_db, temp_out};
use rattendance::core::upsert::UpsertEngine;
use rattendance::db::pool::DbPool;
use rattendance::export::logic::RenderOptions;
use rattendance::export::range::parse_range;
use rattendance::export::{ExportFormat, ExportKind, ExportLogic, build_pdf_title};
use rattendance::models::AttendanceFilter;
use serde_json::json;
use std::fs;

fn seed(pool: &mut DbPool) {
    let batch = vec![
        row(json!({"student_id": "S1", "classroom_id": "C1", "date": "2025-02-03", "status": "absent", "marked_by": "t1", "remarks": "flu"})),
        row(json!({"student_id": "S1", "classroom_id": "C1", "date": "2025-02-01", "status": "present", "marked_by": "t1"})),
        row(json!({"student_id": "S2", "classroom_id": "C1", "date": "2025-02-02", "status": "present"})),
    ];
    UpsertEngine::upsert_batch(pool, &batch, None).unwrap();
}

fn render(pool: &mut DbPool, filter: &AttendanceFilter, kind: ExportKind, format: ExportFormat) -> Vec<u8> {
    ExportLogic::render(pool, filter, kind, format, &RenderOptions::default()).unwrap()
}

/// Page objects in a PDF byte stream (the page tree node excluded).
fn pdf_pages(bytes: &[u8]) -> usize {
    let text = String::from_utf8_lossy(bytes);
    text.matches("/Type /Page").count() - text.matches("/Type /Pages").count()
}

#[test]
fn test_detail_csv_columns_and_order() {
    let mut pool = open_pool("export_detail_csv");
    seed(&mut pool);

    let bytes = render(&mut pool, &AttendanceFilter::new(), ExportKind::Detail, ExportFormat::Csv);
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "date,student_id,classroom_id,status,marked_by,remarks");
    assert_eq!(lines[1], "2025-02-01,S1,C1,present,t1,");
    assert_eq!(lines[2], "2025-02-02,S2,C1,present,,");
    assert_eq!(lines[3], "2025-02-03,S1,C1,absent,t1,flu");
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_empty_csv_has_only_header() {
    let mut pool = open_pool("export_empty_csv");

    let bytes = render(&mut pool, &AttendanceFilter::new(), ExportKind::Detail, ExportFormat::Csv);
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text.trim_end(), "date,student_id,classroom_id,status,marked_by,remarks");
}

#[test]
fn test_summary_csv() {
    let mut pool = open_pool("export_summary_csv");
    seed(&mut pool);

    let bytes = render(&mut pool, &AttendanceFilter::new(), ExportKind::Summary, ExportFormat::Csv);
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[0],
        "student_id,classroom_id,total_days,present_days,absent_days,attendance_percent"
    );
    assert_eq!(lines[1], "S1,C1,2,1,1,50.00");
    assert_eq!(lines[2], "S2,C1,1,1,0,100.00");
}

#[test]
fn test_filtered_json_export() {
    let mut pool = open_pool("export_filtered_json");
    seed(&mut pool);

    let filter = AttendanceFilter::new().student("S1");
    let bytes = render(&mut pool, &filter, ExportKind::Detail, ExportFormat::Json);
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["student_id"] == "S1"));
}

#[test]
fn test_pdf_is_a_pdf_even_when_empty() {
    let mut pool = open_pool("export_pdf_empty");

    let bytes = render(&mut pool, &AttendanceFilter::new(), ExportKind::Detail, ExportFormat::Pdf);
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(pdf_pages(&bytes), 1);
}

#[test]
fn test_pdf_breaks_pages_for_long_reports() {
    let mut pool = open_pool("export_pdf_pages");

    let batch: Vec<_> = (0..120)
        .map(|i| {
            row(json!({
                "student_id": format!("S{i:03}"),
                "classroom_id": "C1",
                "date": "2025-02-03",
                "present": i % 3 != 0,
            }))
        })
        .collect();
    UpsertEngine::upsert_batch(&mut pool, &batch, None).unwrap();

    let bytes = render(&mut pool, &AttendanceFilter::new(), ExportKind::Detail, ExportFormat::Pdf);
    assert!(bytes.starts_with(b"%PDF"));
    assert!(pdf_pages(&bytes) >= 3);
}

#[test]
fn test_xlsx_is_a_zip_container() {
    let mut pool = open_pool("export_xlsx");
    seed(&mut pool);

    let bytes = render(&mut pool, &AttendanceFilter::new(), ExportKind::Summary, ExportFormat::Xlsx);
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_pdf_title_follows_filter() {
    let all = AttendanceFilter::new();
    assert_eq!(build_pdf_title(&all, ExportKind::Detail), "Attendance Report");

    let student = AttendanceFilter::new().student("S1").classroom("C1");
    assert_eq!(
        build_pdf_title(&student, ExportKind::Detail),
        "Attendance Report: Student S1"
    );

    let class = AttendanceFilter::new().classroom("C1").month("2025-02").unwrap();
    assert_eq!(
        build_pdf_title(&class, ExportKind::Detail),
        "Attendance Report: Class C1 (2025-02)"
    );

    let ranged = AttendanceFilter::new()
        .with_text_bounds(Some("2025-02-01"), Some("2025-02-10"))
        .unwrap();
    assert_eq!(
        build_pdf_title(&ranged, ExportKind::Summary),
        "Attendance Summary (from 2025-02-01 to 2025-02-10)"
    );
}

#[test]
fn test_parse_range_shapes() {
    let (s, e) = parse_range("2025").unwrap();
    assert_eq!((s.to_string(), e.to_string()), ("2025-01-01".into(), "2025-12-31".into()));

    let (s, e) = parse_range("2024-02").unwrap();
    assert_eq!((s.to_string(), e.to_string()), ("2024-02-01".into(), "2024-02-29".into()));

    let (_, e) = parse_range("2100-02").unwrap();
    assert_eq!(e.to_string(), "2100-02-28");

    let (_, e) = parse_range("2000-02").unwrap();
    assert_eq!(e.to_string(), "2000-02-29");

    let (s, e) = parse_range("2025-01-05:2025-01-09").unwrap();
    assert_eq!((s.to_string(), e.to_string()), ("2025-01-05".into(), "2025-01-09".into()));

    assert!(parse_range("2025-03:2025-01").is_err());
    assert!(parse_range("2025:2025-01").is_err());
    assert!(parse_range("yesterday").is_err());
}

#[test]
fn test_cli_export_csv_and_pdf() {
    let db_path = setup_test_db("cli_export");
    init_db_with_data(&db_path);

    let csv_out = temp_out("cli_export", "csv");
    rat()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &csv_out, "--classroom", "C1",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&csv_out).expect("read exported csv");
    assert!(content.starts_with("date,student_id,classroom_id,status,marked_by,remarks"));
    assert!(content.contains("2025-09-02,S1,C1,absent"));

    let pdf_out = temp_out("cli_export", "pdf");
    rat()
        .args([
            "--db", &db_path, "export", "--format", "pdf", "--file", &pdf_out, "--summary",
            "--range", "2025-09",
        ])
        .assert()
        .success();

    let bytes = fs::read(&pdf_out).expect("read exported pdf");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_cli_export_refuses_relative_path() {
    let db_path = setup_test_db("cli_export_relative");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", "out.csv"])
        .assert()
        .failure();
}

#[test]
fn test_cli_export_force_overwrites() {
    let db_path = setup_test_db("cli_export_force");
    init_db_with_data(&db_path);

    let out = temp_out("cli_export_force", "json");
    fs::write(&out, "stale").unwrap();

    rat()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("\"student_id\": \"S2\""));
}
