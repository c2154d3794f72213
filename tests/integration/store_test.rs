//! Store access tests: read-only behavior and connection lifecycle.

use std::sync::Arc;
use std::time::Duration;

use northwind_dash::config::StoreConfig;
use northwind_dash::db::{open_store, DataStore, SqliteStore, Value};
use northwind_dash::query::QueryExecutor;

use super::fixture;

#[tokio::test]
async fn test_open_store_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture::northwind_db(dir.path()).await;
    let config = StoreConfig {
        path: path.clone(),
        query_timeout_secs: 5,
    };

    let store = open_store(&config);

    assert_eq!(store.path(), path.as_path());
    let table = store
        .execute_query("SELECT COUNT(*) AS n FROM Category", &[])
        .await
        .unwrap();
    assert_eq!(table.rows, vec![vec![Value::Int(3)]]);
}

#[tokio::test]
async fn test_parameterized_query() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(fixture::northwind_db(dir.path()).await);

    let table = store
        .execute_query(
            "SELECT CompanyName FROM Customer WHERE Country = ? ORDER BY Id",
            &[Value::from("USA")],
        )
        .await
        .unwrap();

    assert_eq!(
        table.rows,
        vec![
            vec![Value::from("Great Lakes Food Market")],
            vec![Value::from("Hungry Coyote Import Store")],
        ]
    );
}

#[tokio::test]
async fn test_executor_rejects_writes_and_store_is_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::new(fixture::northwind_db(dir.path()).await));
    let executor = QueryExecutor::new(store.clone());

    let outcome = executor
        .execute("UPDATE Customer SET Country = 'Mars'", &[])
        .await;
    assert!(outcome.is_error());
    assert!(outcome.table.is_empty());

    let table = store
        .execute_query("SELECT COUNT(*) FROM Customer WHERE Country = 'Mars'", &[])
        .await
        .unwrap();
    assert_eq!(table.rows[0][0], Value::Int(0));
}

#[tokio::test]
async fn test_connections_are_released() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(fixture::northwind_db(dir.path()).await)
        .with_timeout(Some(Duration::from_secs(5)));

    // Far more sequential queries than any handle limit; each must close its own.
    for _ in 0..64 {
        store
            .execute_query("SELECT Id FROM \"Order\"", &[])
            .await
            .unwrap();
    }
    // A failing query also releases its connection.
    for _ in 0..8 {
        assert!(store.execute_query("SELECT nope FROM nowhere", &[]).await.is_err());
    }
    let table = store
        .execute_query("SELECT COUNT(*) FROM \"Order\"", &[])
        .await
        .unwrap();
    assert_eq!(table.rows[0][0], Value::Int(6));
}

#[tokio::test]
async fn test_execution_time_is_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(fixture::northwind_db(dir.path()).await);

    let table = store.execute_query("SELECT 1", &[]).await.unwrap();

    assert!(table.execution_time > Duration::ZERO);
}
