//! In-memory stores for testing.
//!
//! Provide canned results without touching the filesystem.

use super::{DataStore, Table, Value};
use crate::error::{DashError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A store that answers known SQL texts with predefined tables.
#[derive(Debug, Default)]
pub struct StaticStore {
    tables: HashMap<String, Table>,
    calls: AtomicUsize,
}

impl StaticStore {
    /// Creates a store that knows no statements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the table returned for `sql`.
    pub fn with_table(mut self, sql: impl Into<String>, table: Table) -> Self {
        self.tables.insert(sql.into(), table);
        self
    }

    /// Number of statements executed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataStore for StaticStore {
    async fn execute_query(&self, sql: &str, _params: &[Value]) -> Result<Table> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tables
            .get(sql)
            .cloned()
            .ok_or_else(|| DashError::store("no such table in static store"))
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

/// A store whose every query fails with the same message.
#[derive(Debug, Clone)]
pub struct FailingStore {
    message: String,
}

impl FailingStore {
    /// Creates a store that fails with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl DataStore for FailingStore {
    async fn execute_query(&self, _sql: &str, _params: &[Value]) -> Result<Table> {
        Err(DashError::store(self.message.clone()))
    }

    fn describe(&self) -> String {
        "unavailable".to_string()
    }
}
