//! Store abstraction layer for the dashboard.
//!
//! Provides a trait-based interface over the read-only data store, allowing
//! the SQLite file and in-memory test stores to be used interchangeably.

mod mock;
mod sqlite;
mod types;

pub use mock::{FailingStore, StaticStore};
pub use sqlite::SqliteStore;
pub use types::{ColumnInfo, Row, Table, Value};

use crate::config::StoreConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Creates the store described by the configuration.
///
/// This is the central factory for the backing store. No connection is
/// opened here.
pub fn open_store(config: &StoreConfig) -> SqliteStore {
    SqliteStore::new(&config.path).with_timeout(config.query_timeout())
}

/// Trait defining the interface for data stores.
///
/// Implementations must release any handle they acquire before returning,
/// on success and on failure alike.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Executes a SQL statement with positional parameters and materializes all rows.
    async fn execute_query(&self, sql: &str, params: &[Value]) -> Result<Table>;

    /// Short human-readable description of the store for the header bar.
    fn describe(&self) -> String;
}
