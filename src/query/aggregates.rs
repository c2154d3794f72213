//! The dashboard's aggregation queries.
//!
//! Rounding happens in SQL so repeated runs over the same store are
//! bit-exact. Each statement's ORDER BY is part of its contract: the default
//! country selection takes the first rows of the country table.

use serde::Serialize;

use super::executor::{QueryExecutor, QueryOutcome};
use crate::db::Table;

/// Column names shared by the queries and their consumers.
pub mod columns {
    pub const COUNTRY: &str = "Country";
    pub const TOTAL_SALES: &str = "TotalSales";
    pub const TOTAL_ORDERS: &str = "TotalOrders";
    pub const CATEGORY_NAME: &str = "CategoryName";
    pub const PROFIT: &str = "Profit";
    pub const PRODUCT_NAME: &str = "ProductName";
    pub const TOTAL_SOLD: &str = "TotalSold";
    pub const TOTAL_REVENUE: &str = "TotalRevenue";
}

/// Total sales and distinct order count per customer country.
pub const SALES_BY_COUNTRY_SQL: &str = r#"
SELECT cu.Country,
       ROUND(SUM(od.UnitPrice * od.Quantity), 2) AS TotalSales,
       COUNT(DISTINCT o.Id) AS TotalOrders
FROM "Order" o
JOIN Customer cu ON o.CustomerId = cu.Id
JOIN OrderDetail od ON o.Id = od.OrderId
GROUP BY cu.Country
ORDER BY TotalSales DESC
"#;

/// Revenue net of discounts per product category.
pub const PROFIT_BY_CATEGORY_SQL: &str = r#"
SELECT c.CategoryName,
       ROUND(SUM(od.UnitPrice * od.Quantity)
             - SUM(od.UnitPrice * od.Quantity * od.Discount), 2) AS Profit
FROM OrderDetail od
JOIN Product p ON od.ProductId = p.Id
JOIN Category c ON p.CategoryId = c.Id
GROUP BY c.CategoryName
ORDER BY Profit DESC
"#;

/// The ten products with the most units sold.
pub const TOP_SELLING_PRODUCTS_SQL: &str = r#"
SELECT p.ProductName,
       SUM(od.Quantity) AS TotalSold,
       ROUND(SUM(od.UnitPrice * od.Quantity), 2) AS TotalRevenue
FROM OrderDetail od
JOIN Product p ON od.ProductId = p.Id
GROUP BY p.ProductName
ORDER BY TotalSold DESC
LIMIT 10
"#;

/// Sales grouped by customer country, descending by total sales.
pub async fn sales_by_country(executor: &QueryExecutor) -> QueryOutcome {
    executor.execute(SALES_BY_COUNTRY_SQL, &[]).await
}

/// Profit grouped by product category, descending by profit.
pub async fn profit_by_category(executor: &QueryExecutor) -> QueryOutcome {
    executor.execute(PROFIT_BY_CATEGORY_SQL, &[]).await
}

/// Top ten products by quantity sold, with revenue.
pub async fn top_selling_products(executor: &QueryExecutor) -> QueryOutcome {
    executor.execute(TOP_SELLING_PRODUCTS_SQL, &[]).await
}

/// One row of [`SALES_BY_COUNTRY_SQL`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySales {
    pub country: String,
    pub total_sales: f64,
    pub total_orders: i64,
}

impl CountrySales {
    /// Decodes rows by column name. Rows with a NULL country are skipped.
    pub fn from_table(table: &Table) -> Vec<Self> {
        (0..table.row_count())
            .filter_map(|i| {
                Some(Self {
                    country: table.get(i, columns::COUNTRY)?.as_key()?,
                    total_sales: number(table, i, columns::TOTAL_SALES),
                    total_orders: table
                        .get(i, columns::TOTAL_ORDERS)
                        .and_then(|v| v.as_i64())
                        .unwrap_or(0),
                })
            })
            .collect()
    }
}

/// One row of [`PROFIT_BY_CATEGORY_SQL`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryProfit {
    pub category_name: String,
    pub profit: f64,
}

impl CategoryProfit {
    /// Decodes rows by column name. Rows with a NULL category are skipped.
    pub fn from_table(table: &Table) -> Vec<Self> {
        (0..table.row_count())
            .filter_map(|i| {
                Some(Self {
                    category_name: table.get(i, columns::CATEGORY_NAME)?.as_key()?,
                    profit: number(table, i, columns::PROFIT),
                })
            })
            .collect()
    }
}

/// One row of [`TOP_SELLING_PRODUCTS_SQL`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProduct {
    pub product_name: String,
    pub total_sold: i64,
    pub total_revenue: f64,
}

impl TopProduct {
    /// Decodes rows by column name.
    pub fn from_table(table: &Table) -> Vec<Self> {
        (0..table.row_count())
            .filter_map(|i| {
                Some(Self {
                    product_name: table.get(i, columns::PRODUCT_NAME)?.as_key()?,
                    total_sold: table
                        .get(i, columns::TOTAL_SOLD)
                        .and_then(|v| v.as_i64())
                        .unwrap_or(0),
                    total_revenue: number(table, i, columns::TOTAL_REVENUE),
                })
            })
            .collect()
    }
}

fn number(table: &Table, row: usize, column: &str) -> f64 {
    table
        .get(row, column)
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}
