//! Headless UI tests.

pub mod common;
pub mod dashboard_test;
pub mod headless_test;
