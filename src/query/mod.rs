//! Query layer for the dashboard.
//!
//! Isolates SQL execution, the fixed aggregation queries and the filter
//! binding from the terminal UI.

pub mod aggregates;
pub mod data;
pub mod executor;
pub mod filter;

pub use aggregates::{
    profit_by_category, sales_by_country, top_selling_products, CategoryProfit, CountrySales,
    TopProduct,
};
pub use data::DashboardData;
pub use executor::{QueryExecutor, QueryOutcome};
pub use filter::{FilterState, FilteredView, MultiSelect};
