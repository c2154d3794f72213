//! Page-load data for the dashboard.

use tracing::info;

use super::aggregates::{self, columns};
use super::executor::QueryExecutor;
use crate::db::Table;

/// The three result tables materialized by one page load.
///
/// Tables are independent; no consistency between them is implied.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub sales_by_country: Table,
    pub profit_by_category: Table,
    pub top_products: Table,
    /// One user-visible message per failed query.
    pub notices: Vec<String>,
}

impl DashboardData {
    /// Runs the three aggregation queries in sequence.
    pub async fn load(executor: &QueryExecutor) -> Self {
        let mut notices = Vec::new();
        let mut keep = |outcome: super::QueryOutcome| {
            if let Some(notice) = outcome.notice() {
                notices.push(notice);
            }
            outcome.into_table()
        };

        let sales_by_country = keep(aggregates::sales_by_country(executor).await);
        let profit_by_category = keep(aggregates::profit_by_category(executor).await);
        let top_products = keep(aggregates::top_selling_products(executor).await);

        info!(
            "Loaded dashboard: {} countries, {} categories, {} top products, {} errors",
            sales_by_country.row_count(),
            profit_by_category.row_count(),
            top_products.row_count(),
            notices.len()
        );

        Self {
            sales_by_country,
            profit_by_category,
            top_products,
            notices,
        }
    }

    /// Countries in descending sales order.
    pub fn countries(&self) -> Vec<String> {
        self.sales_by_country.distinct(columns::COUNTRY)
    }

    /// Categories in descending profit order.
    pub fn categories(&self) -> Vec<String> {
        self.profit_by_category.distinct(columns::CATEGORY_NAME)
    }

    /// Summary counter: distinct countries in the unfiltered table.
    pub fn total_countries(&self) -> usize {
        self.countries().len()
    }

    /// Summary counter: distinct categories in the unfiltered table.
    pub fn total_categories(&self) -> usize {
        self.categories().len()
    }
}
