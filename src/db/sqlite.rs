//! SQLite store implementation.
//!
//! Provides the `SqliteStore` struct that implements the `DataStore` trait
//! for a read-only SQLite file using sqlx. No connection is kept between
//! queries: each call opens its own handle and closes it before returning.

use crate::db::{ColumnInfo, DataStore, Row, Table, Value};
use crate::error::{DashError, Result};
use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{
    Column as SqlxColumn, ConnectOptions, Connection, Executor, Row as SqlxRow, Statement,
    TypeInfo, ValueRef,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// VM instructions between deadline checks.
const PROGRESS_STEPS: i32 = 10_000;

/// Read-only SQLite store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    timeout: Option<Duration>,
}

impl SqliteStore {
    /// Creates a store over the file at `path`. Nothing is opened yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timeout: None,
        }
    }

    /// Bounds every query by `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a fresh read-only connection.
    async fn open(&self) -> Result<SqliteConnection> {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .read_only(true)
            .create_if_missing(false)
            .connect()
            .await
            .map_err(|e| {
                DashError::store(format!("Failed to open {}: {e}", self.path.display()))
            })
    }
}

#[async_trait]
impl DataStore for SqliteStore {
    async fn execute_query(&self, sql: &str, params: &[Value]) -> Result<Table> {
        let start = Instant::now();
        let mut conn = self.open().await?;
        debug!("Opened connection to {}", self.path.display());

        let result = match self.timeout {
            Some(limit) => match interrupt_after(&mut conn, limit).await {
                Ok(deadline) => fetch(&mut conn, sql, params).await.map_err(|e| {
                    if Instant::now() >= deadline {
                        DashError::store(format!("Query timed out after {limit:?}"))
                    } else {
                        e
                    }
                }),
                Err(e) => Err(e),
            },
            None => fetch(&mut conn, sql, params).await,
        };

        // Released on every path; a failed close only loses the handle early.
        if let Err(e) = conn.close().await {
            warn!("Error closing connection to {}: {}", self.path.display(), e);
        }

        result.map(|table| table.with_execution_time(start.elapsed()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Installs a progress handler that makes SQLite abort the running statement
/// once `limit` has passed. Returns the deadline.
async fn interrupt_after(conn: &mut SqliteConnection, limit: Duration) -> Result<Instant> {
    let deadline = Instant::now() + limit;
    conn.lock_handle()
        .await?
        .set_progress_handler(PROGRESS_STEPS, move || Instant::now() < deadline);
    Ok(deadline)
}

/// Prepares, binds and materializes one statement.
async fn fetch(conn: &mut SqliteConnection, sql: &str, params: &[Value]) -> Result<Table> {
    // Preparing first keeps column names for result sets with no rows.
    let statement = (&mut *conn).prepare(sql).await?;
    let columns: Vec<ColumnInfo> = statement
        .columns()
        .iter()
        .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
        .collect();

    let query = params
        .iter()
        .fold(sqlx::query(sql), |query, value| bind_value(query, value));
    let rows = query.fetch_all(&mut *conn).await?;

    let rows = rows.iter().map(convert_row).collect::<Result<Vec<Row>>>()?;
    Ok(Table::with_data(columns, rows))
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Int(i) => query.bind(*i),
        Value::Float(f) => query.bind(*f),
        Value::String(s) => query.bind(s.clone()),
        Value::Bytes(b) => query.bind(b.clone()),
    }
}

/// Converts a SQLite row to our Row type.
fn convert_row(row: &SqliteRow) -> Result<Row> {
    (0..row.columns().len())
        .map(|index| convert_value(row, index))
        .collect()
}

/// Decodes one cell by its storage class rather than its declared type.
fn convert_value(row: &SqliteRow, index: usize) -> Result<Value> {
    let storage = {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        raw.type_info().name().to_string()
    };

    let value = match storage.as_str() {
        "INTEGER" | "BOOLEAN" => Value::Int(row.try_get::<i64, _>(index)?),
        "REAL" | "NUMERIC" => Value::Float(row.try_get::<f64, _>(index)?),
        "BLOB" => Value::Bytes(row.try_get::<Vec<u8>, _>(index)?),
        _ => Value::String(row.try_get::<String, _>(index)?),
    };

    Ok(value)
}
