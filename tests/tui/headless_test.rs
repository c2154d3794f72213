//! End-to-end tests of the binary in headless mode.

use super::common::run_headless;
use crate::integration::fixture;

#[tokio::test]
async fn test_headless_basic_execution() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture::northwind_db(dir.path()).await;

    let (code, stdout, _) = run_headless(&db, &["--events", "key:q"]);

    assert_eq!(code, 0, "Expected exit code 0");
    assert!(stdout.contains("Events: 1 executed"), "{stdout}");
}

#[tokio::test]
async fn test_headless_landing_page() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture::northwind_db(dir.path()).await;

    let (code, stdout, _) = run_headless(
        &db,
        &["--events", "assert:contains:Northwind Sales Analysis,assert:contains:Methodology"],
    );

    assert_eq!(code, 0, "{stdout}");
    assert!(stdout.contains("Assertions: 2 passed, 0 failed"));
}

#[tokio::test]
async fn test_headless_dashboard_json_state() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture::northwind_db(dir.path()).await;

    let (code, stdout, _) = run_headless(
        &db,
        &["--page", "dashboard", "--events", "assert:state:page=Dashboard", "--output", "json"],
    );

    assert_eq!(code, 0, "{stdout}");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["assertions"]["passed"], 1);
    assert_eq!(parsed["state"]["total_countries"], 3);
    assert_eq!(
        parsed["state"]["selected_countries"],
        serde_json::json!(["USA", "Germany", "France"])
    );
    assert!(parsed["screen"].as_str().unwrap().contains("Sales by Country"));
}

#[tokio::test]
async fn test_headless_assertion_failure_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture::northwind_db(dir.path()).await;

    let (code, stdout, _) = run_headless(&db, &["--events", "assert:contains:Atlantis"]);

    assert_eq!(code, 1);
    assert!(stdout.contains("0 passed, 1 failed"));
}

#[tokio::test]
async fn test_headless_missing_store_still_renders() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("missing.sqlite");

    let (code, stdout, _) = run_headless(
        &db,
        &[
            "--events",
            "key:2,assert:contains:Database error,assert:contains:No data available for selected categories",
        ],
    );

    assert_eq!(code, 0, "{stdout}");
    assert!(!db.exists());
}

#[tokio::test]
async fn test_headless_requires_events() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture::northwind_db(dir.path()).await;

    let (code, _, stderr) = run_headless(&db, &[]);

    assert_eq!(code, 1);
    assert!(stderr.contains("requires --events or --script"), "{stderr}");
}

#[tokio::test]
async fn test_headless_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture::northwind_db(dir.path()).await;
    let out = dir.path().join("screen.txt");

    let (code, stdout, _) = run_headless(
        &db,
        &["--events", "key:2", "--output-file", out.to_str().unwrap()],
    );

    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("Top 10 Selling Products"));
}

#[tokio::test]
async fn test_headless_text_reports_selection() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture::northwind_db(dir.path()).await;

    let (code, stdout, _) = run_headless(
        &db,
        &["--events", "key:2,key:space,assert:selected:countries=Germany|France"],
    );

    assert_eq!(code, 0, "{stdout}");
    assert!(stdout.contains("Page: Dashboard (focus: Countries)"));
    assert!(stdout.contains("Countries: Germany, France (2 of 3)"));
    assert!(stdout.contains("Assertions: 1 passed, 0 failed"));
}

#[tokio::test]
async fn test_headless_rejects_unknown_state_field() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture::northwind_db(dir.path()).await;

    let (code, stdout, stderr) = run_headless(&db, &["--events", "assert:state:pages=Home"]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Unknown state field"), "{stderr}");
}
