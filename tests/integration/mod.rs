//! Store and query integration tests.

pub mod fixture;
pub mod filter_test;
pub mod query_test;
pub mod store_test;
