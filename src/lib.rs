//! Northwind Dash - a terminal sales dashboard over the Northwind SQLite sample.
//!
//! This library exposes the core modules for the binary and integration tests.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod query;
pub mod safety;
pub mod tui;
