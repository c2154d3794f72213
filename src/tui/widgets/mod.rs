//! TUI widgets for the dashboard.
//!
//! Contains reusable UI components.

pub mod counters;
pub mod filter_list;
pub mod header;
pub mod home;
pub mod palette;
pub mod profit_share;
pub mod sales_chart;
pub mod table;
pub mod toast;
