//! Spending summary
//!
//! Income, expense totals by category, savings and savings rate for a set of
//! classified transactions.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Money, Transaction};
use crate::services::filter::Classified;

/// Net spending in one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// Category name
    pub category: String,
    /// Signed sum; refunds net against charges
    pub total: Money,
    /// Number of transactions in the category
    pub transaction_count: usize,
}

/// A category total together with its share of income
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCategory {
    pub category: String,
    pub total: Money,
    /// Share of total income in percent, 0 when there is no income
    pub percent_of_income: f64,
}

/// Headline figures for the period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub total_income: Money,
    pub total_expenses: Money,
    /// Income minus expenses; negative when overspent
    pub savings: Money,
    /// Savings as a percentage of income, 0 when there is no income
    pub savings_rate: f64,
}

impl Metrics {
    /// Derive savings and savings rate from income and expenses
    pub fn new(total_income: Money, total_expenses: Money) -> Self {
        let savings = total_income - total_expenses;
        Self {
            total_income,
            total_expenses,
            savings,
            savings_rate: savings.percent_of(total_income),
        }
    }
}

/// Spending Summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingSummary {
    pub metrics: Metrics,
    /// Category totals, largest first
    pub category_totals: Vec<CategoryTotal>,
}

impl SpendingSummary {
    /// Generate the summary for classified transactions
    pub fn generate(classified: &Classified<'_>) -> Self {
        let category_totals = category_totals(&classified.expenses);
        let total_expenses = category_totals.iter().map(|c| c.total).sum();

        Self {
            metrics: Metrics::new(total_income(&classified.income), total_expenses),
            category_totals,
        }
    }

    /// Total for one category, zero when absent
    pub fn category_total(&self, category: &str) -> Money {
        self.category_totals
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.total)
            .unwrap_or_default()
    }

    /// Get the largest categories with their share of income
    pub fn top_categories(&self, limit: usize) -> Vec<TopCategory> {
        self.category_totals
            .iter()
            .take(limit)
            .map(|c| TopCategory {
                category: c.category.clone(),
                total: c.total,
                percent_of_income: c.total.percent_of(self.metrics.total_income),
            })
            .collect()
    }

    /// Category names in alphabetical order
    pub fn category_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .category_totals
            .iter()
            .map(|c| c.category.clone())
            .collect();
        names.sort();
        names
    }
}

/// Sum of absolute income amounts; missing amounts are skipped
pub fn total_income(income: &[&Transaction]) -> Money {
    income.iter().filter_map(|t| t.amount).map(|a| a.abs()).sum()
}

/// Group expense-eligible transactions by category and sum their signed
/// amounts. Sorted by total, largest first; equal totals keep the order in
/// which their categories first appeared.
pub fn category_totals(expenses: &[&Transaction]) -> Vec<CategoryTotal> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for txn in expenses {
        let Some(category) = txn.category_name() else {
            continue;
        };

        let idx = *positions.entry(category).or_insert_with(|| {
            totals.push(CategoryTotal {
                category: category.to_string(),
                total: Money::zero(),
                transaction_count: 0,
            });
            totals.len() - 1
        });

        let entry = &mut totals[idx];
        entry.transaction_count += 1;
        if let Some(amount) = txn.amount {
            entry.total += amount;
        }
    }

    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}
