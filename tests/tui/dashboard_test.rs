//! Dashboard rendering against a real store, driven in-process.

use std::path::Path;
use std::sync::Arc;

use northwind_dash::db::SqliteStore;
use northwind_dash::query::QueryExecutor;
use northwind_dash::tui::headless::{HeadlessConfig, HeadlessResult, HeadlessRunner};
use northwind_dash::tui::App;

use crate::integration::fixture;

async fn run(db: &Path, events: &str) -> HeadlessResult {
    let executor = QueryExecutor::new(Arc::new(SqliteStore::new(db)));
    let mut runner = HeadlessRunner::new(HeadlessConfig::default(), App::new(None, 5))
        .unwrap()
        .with_executor(executor);
    runner.load_events(events).unwrap();
    runner.run().await.unwrap()
}

#[tokio::test]
async fn test_dashboard_sections_render() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture::northwind_db(dir.path()).await;

    let result = run(&db, "key:2").await;

    for text in [
        "Sales by Country",
        "Profit by Category",
        "Top 10 Selling Products",
        "Total Countries",
        "Total Product Categories",
        "USA",
        "Beverages",
        "Chai",
    ] {
        assert!(result.screen.contains(text), "missing {text:?}\n{}", result.screen);
    }
    assert!(result.state.notices.is_empty());
    assert_eq!(result.state.total_categories, 3);
}

#[tokio::test]
async fn test_toggling_countries_updates_selection() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture::northwind_db(dir.path()).await;

    let result = run(&db, "key:2,key:space,assert:state:selected_countries=2").await;

    assert_eq!(result.assertions_passed, 1);
    assert_eq!(result.state.selected_countries, vec!["Germany", "France"]);
}

#[tokio::test]
async fn test_clearing_categories_shows_warning() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture::northwind_db(dir.path()).await;

    let result = run(
        &db,
        "key:2,key:right,key:n,assert:contains:No data available for selected categories",
    )
    .await;

    assert_eq!(result.assertions_failed, 0);
    assert!(result.state.selected_categories.is_empty());
    assert_eq!(result.state.selected_countries.len(), 3);
}

#[tokio::test]
async fn test_reload_restores_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture::northwind_db(dir.path()).await;

    let result = run(&db, "key:2,key:n,key:r").await;

    assert_eq!(result.state.selected_countries, vec!["USA", "Germany", "France"]);
}

#[tokio::test]
async fn test_empty_store_renders_without_notices() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture::empty_northwind_db(dir.path()).await;

    let result = run(
        &db,
        "key:2,assert:contains:No data available for selected countries,assert:state:total_countries=0",
    )
    .await;

    assert_eq!(result.assertions_failed, 0);
    assert!(result.state.notices.is_empty());
}

#[tokio::test]
async fn test_reload_reports_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let db = fixture::northwind_db(dir.path()).await;

    let result = run(
        &db,
        "key:2,assert:not-contains:Dashboard data loaded,key:r,assert:contains:Dashboard data loaded",
    )
    .await;

    assert_eq!(result.assertions_failed, 0);
    assert_eq!(result.assertions_passed, 2);
}
