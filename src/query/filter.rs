//! Filter binding between the loaded tables and the multi-select controls.
//!
//! Filtering only subsets tables that are already in memory; it never
//! re-queries the store.

use std::collections::HashSet;

use super::aggregates::columns;
use super::data::DashboardData;
use crate::db::Table;

/// A multi-select control's model: ordered options and the chosen subset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiSelect {
    options: Vec<String>,
    selected: HashSet<String>,
}

impl MultiSelect {
    /// All options selected.
    pub fn all(options: Vec<String>) -> Self {
        let selected = options.iter().cloned().collect();
        Self { options, selected }
    }

    /// The first `n` options selected.
    pub fn first(options: Vec<String>, n: usize) -> Self {
        let selected = options.iter().take(n).cloned().collect();
        Self { options, selected }
    }

    /// Available options in display order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The selected set.
    pub fn selected(&self) -> &HashSet<String> {
        &self.selected
    }

    /// Selected options in display order.
    pub fn selected_in_order(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|o| self.selected.contains(*o))
            .map(String::as_str)
            .collect()
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.contains(option)
    }

    /// Flips one option. Unknown options are ignored.
    pub fn toggle(&mut self, option: &str) {
        if !self.options.iter().any(|o| o == option) {
            return;
        }
        if !self.selected.remove(option) {
            self.selected.insert(option.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.options.iter().cloned().collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

/// Selections for both dashboard filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub countries: MultiSelect,
    pub categories: MultiSelect,
}

impl FilterState {
    /// Initial selection: the first `country_count` countries and every category.
    pub fn defaults(data: &DashboardData, country_count: usize) -> Self {
        Self {
            countries: MultiSelect::first(data.countries(), country_count),
            categories: MultiSelect::all(data.categories()),
        }
    }

    /// Restricts the loaded tables to the current selection.
    pub fn apply(&self, data: &DashboardData) -> FilteredView {
        FilteredView {
            country_sales: data
                .sales_by_country
                .filter_in(columns::COUNTRY, self.countries.selected()),
            category_profit: data
                .profit_by_category
                .filter_in(columns::CATEGORY_NAME, self.categories.selected()),
        }
    }
}

/// The tables the charts are drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    pub country_sales: Table,
    pub category_profit: Table,
}
