//! Filter behavior over real query results.

use std::collections::HashSet;
use std::sync::Arc;

use northwind_dash::db::SqliteStore;
use northwind_dash::query::{aggregates::columns, DashboardData, FilterState, QueryExecutor};
use pretty_assertions::assert_eq;

use super::fixture;

async fn load() -> (tempfile::TempDir, DashboardData) {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture::northwind_db(dir.path()).await;
    let executor = QueryExecutor::new(Arc::new(SqliteStore::new(path)));
    let data = DashboardData::load(&executor).await;
    (dir, data)
}

#[tokio::test]
async fn test_default_selection_takes_top_countries() {
    let (_dir, data) = load().await;

    let filters = FilterState::defaults(&data, 2);

    assert_eq!(
        filters.countries.selected_in_order(),
        vec!["USA", "Germany"]
    );
    assert_eq!(
        filters.categories.selected_in_order(),
        vec!["Beverages", "Seafood", "Condiments"]
    );
}

#[tokio::test]
async fn test_filtered_rows_are_subset_of_selection() {
    let (_dir, data) = load().await;
    let mut filters = FilterState::defaults(&data, 5);
    filters.countries.toggle("Germany");
    filters.categories.toggle("Seafood");

    let view = filters.apply(&data);

    let countries: HashSet<String> = view
        .country_sales
        .distinct(columns::COUNTRY)
        .into_iter()
        .collect();
    assert_eq!(
        countries,
        HashSet::from(["USA".to_string(), "France".to_string()])
    );
    assert_eq!(
        view.category_profit.distinct(columns::CATEGORY_NAME),
        vec!["Beverages", "Condiments"]
    );
}

#[tokio::test]
async fn test_filtering_never_drops_selected_rows() {
    let (_dir, data) = load().await;
    let mut filters = FilterState::defaults(&data, 0);
    filters.countries.select_all();

    let view = filters.apply(&data);

    // Every non-NULL country row is kept; only the NULL group falls out.
    assert_eq!(view.country_sales.row_count(), 3);
    assert_eq!(view.category_profit, data.profit_by_category);
}

#[tokio::test]
async fn test_empty_selection() {
    let (_dir, data) = load().await;
    let mut filters = FilterState::defaults(&data, 5);
    filters.countries.clear();
    filters.categories.clear();

    let view = filters.apply(&data);

    assert!(view.country_sales.is_empty());
    assert!(view.category_profit.is_empty());
    // Top products are never filtered.
    assert_eq!(data.top_products.row_count(), 4);
}
