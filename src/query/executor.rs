//! Query execution with failure isolation.
//!
//! The executor is the boundary where store errors stop: every call yields a
//! table, empty when anything went wrong, together with the error that
//! should be shown to the user.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error};

use crate::db::{DataStore, Table, Value};
use crate::error::DashError;
use crate::safety::ensure_read_only;

/// Query executor over a shared store.
#[derive(Clone)]
pub struct QueryExecutor {
    store: Arc<dyn DataStore>,
}

impl QueryExecutor {
    /// Creates a new query executor.
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Description of the underlying store.
    pub fn store_description(&self) -> String {
        self.store.describe()
    }

    /// Runs a statement. Never fails: errors become an empty table plus a notice.
    ///
    /// Statements that are not read-only are rejected before the store is
    /// touched.
    pub async fn execute(&self, sql: &str, params: &[Value]) -> QueryOutcome {
        let start = Instant::now();

        let result = match ensure_read_only(sql) {
            Ok(()) => self.store.execute_query(sql, params).await,
            Err(e) => Err(e),
        };
        let execution_time = start.elapsed();

        match result {
            Ok(table) => {
                debug!(
                    "Query returned {} rows in {:?}",
                    table.row_count(),
                    execution_time
                );
                QueryOutcome {
                    table,
                    error: None,
                    execution_time,
                }
            }
            Err(e) => {
                error!("Database error: {}", e);
                QueryOutcome {
                    table: Table::new(),
                    error: Some(e),
                    execution_time,
                }
            }
        }
    }
}

/// Outcome of one query execution.
#[derive(Debug)]
pub struct QueryOutcome {
    /// The materialized result; empty when `error` is set.
    pub table: Table,
    /// What went wrong, if anything.
    pub error: Option<DashError>,
    /// Wall time including connection setup.
    pub execution_time: Duration,
}

impl QueryOutcome {
    /// Returns true if the query failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// User-visible message for a failed query.
    pub fn notice(&self) -> Option<String> {
        self.error.as_ref().map(|e| format!("Database error: {e}"))
    }

    /// Discards the error and keeps the table.
    pub fn into_table(self) -> Table {
        self.table
    }
}
