//! Aggregation query tests against the fixture database.

use std::sync::Arc;

use northwind_dash::db::{SqliteStore, Value};
use northwind_dash::query::{
    aggregates::columns, profit_by_category, sales_by_country, top_selling_products,
    CategoryProfit, CountrySales, DashboardData, QueryExecutor, TopProduct,
};
use pretty_assertions::assert_eq;

use super::fixture;

fn executor(path: std::path::PathBuf) -> QueryExecutor {
    QueryExecutor::new(Arc::new(SqliteStore::new(path)))
}

#[tokio::test]
async fn test_sales_by_country() {
    let dir = tempfile::tempdir().unwrap();
    let executor = executor(fixture::northwind_db(dir.path()).await);

    let outcome = sales_by_country(&executor).await;
    assert!(!outcome.is_error(), "{:?}", outcome.error);

    let names: Vec<&str> = outcome
        .table
        .columns
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![columns::COUNTRY, columns::TOTAL_SALES, columns::TOTAL_ORDERS]
    );

    assert_eq!(
        CountrySales::from_table(&outcome.table),
        vec![
            CountrySales {
                country: "USA".to_string(),
                total_sales: 830.0,
                total_orders: 3,
            },
            CountrySales {
                country: "Germany".to_string(),
                total_sales: 335.0,
                total_orders: 1,
            },
            CountrySales {
                country: "France".to_string(),
                total_sales: 200.0,
                total_orders: 1,
            },
        ]
    );

    // The NULL-country group is still part of the raw result.
    assert_eq!(outcome.table.row_count(), 4);
    assert_eq!(outcome.table.get(3, columns::COUNTRY), Some(&Value::Null));
}

#[tokio::test]
async fn test_profit_by_category_nets_discounts() {
    let dir = tempfile::tempdir().unwrap();
    let executor = executor(fixture::northwind_db(dir.path()).await);

    let outcome = profit_by_category(&executor).await;

    assert_eq!(
        CategoryProfit::from_table(&outcome.table),
        vec![
            CategoryProfit {
                category_name: "Beverages".to_string(),
                profit: 955.6,
            },
            CategoryProfit {
                category_name: "Seafood".to_string(),
                profit: 201.5,
            },
            CategoryProfit {
                category_name: "Condiments".to_string(),
                profit: 200.0,
            },
        ]
    );
}

#[tokio::test]
async fn test_top_selling_products() {
    let dir = tempfile::tempdir().unwrap();
    let executor = executor(fixture::northwind_db(dir.path()).await);

    let outcome = top_selling_products(&executor).await;
    let products = TopProduct::from_table(&outcome.table);

    let summary: Vec<(&str, i64, f64)> = products
        .iter()
        .map(|p| (p.product_name.as_str(), p.total_sold, p.total_revenue))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Chai", 40, 720.0),
            ("Aniseed Syrup", 20, 200.0),
            ("Chang", 13, 247.0),
            ("Ikura", 7, 217.0),
        ]
    );
}

#[tokio::test]
async fn test_top_selling_products_stops_at_ten() {
    let dir = tempfile::tempdir().unwrap();
    let executor = executor(fixture::catalog_db(dir.path()).await);

    let outcome = top_selling_products(&executor).await;
    assert!(!outcome.is_error(), "{:?}", outcome.error);
    assert_eq!(outcome.table.row_count(), 10);

    let summary: Vec<(String, i64, f64)> = TopProduct::from_table(&outcome.table)
        .into_iter()
        .map(|p| (p.product_name, p.total_sold, p.total_revenue))
        .collect();
    let expected: Vec<(String, i64, f64)> = (6..=15)
        .rev()
        .map(|n: i64| (format!("P{n:02}"), n, (n * (16 - n)) as f64))
        .collect();
    assert_eq!(summary, expected);
}

#[tokio::test]
async fn test_results_are_sorted_descending() {
    let dir = tempfile::tempdir().unwrap();
    let executor = executor(fixture::northwind_db(dir.path()).await);
    let data = DashboardData::load(&executor).await;

    let sales: Vec<f64> = CountrySales::from_table(&data.sales_by_country)
        .iter()
        .map(|r| r.total_sales)
        .collect();
    assert!(sales.windows(2).all(|w| w[0] >= w[1]));

    let profits: Vec<f64> = CategoryProfit::from_table(&data.profit_by_category)
        .iter()
        .map(|r| r.profit)
        .collect();
    assert!(profits.windows(2).all(|w| w[0] >= w[1]));

    let sold: Vec<i64> = TopProduct::from_table(&data.top_products)
        .iter()
        .map(|r| r.total_sold)
        .collect();
    assert!(sold.windows(2).all(|w| w[0] >= w[1]));
    assert!(sold.len() <= 10);
}

#[tokio::test]
async fn test_repeated_loads_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let executor = executor(fixture::northwind_db(dir.path()).await);

    let first = DashboardData::load(&executor).await;
    let second = DashboardData::load(&executor).await;

    assert_eq!(first.sales_by_country, second.sales_by_country);
    assert_eq!(first.profit_by_category, second.profit_by_category);
    assert_eq!(first.top_products, second.top_products);
    assert!(first.notices.is_empty());
}

#[tokio::test]
async fn test_summary_counters() {
    let dir = tempfile::tempdir().unwrap();
    let executor = executor(fixture::northwind_db(dir.path()).await);
    let data = DashboardData::load(&executor).await;

    assert_eq!(data.total_countries(), 3);
    assert_eq!(data.total_categories(), 3);
}

#[tokio::test]
async fn test_empty_store_yields_empty_tables_without_notices() {
    let dir = tempfile::tempdir().unwrap();
    let executor = executor(fixture::empty_northwind_db(dir.path()).await);

    let data = DashboardData::load(&executor).await;

    assert!(data.notices.is_empty());
    assert!(data.sales_by_country.is_empty());
    assert!(data.profit_by_category.is_empty());
    assert!(data.top_products.is_empty());
    // Column names survive an empty result.
    assert_eq!(data.top_products.columns.len(), 3);
}

#[tokio::test]
async fn test_missing_store_yields_notices() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("data").join("Northwind_small.sqlite");
    let executor = executor(missing.clone());

    let data = DashboardData::load(&executor).await;

    assert_eq!(data.notices.len(), 3);
    assert!(data.notices.iter().all(|n| n.starts_with("Database error:")));
    assert!(data.sales_by_country.is_empty());
    assert!(!missing.exists());
}
