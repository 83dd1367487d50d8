//! Dashboard view computation
//!
//! `compute_view` runs the whole pipeline (date filter, excluded policy,
//! classification, aggregation) and returns everything a front end needs to
//! draw the dashboard. It is pure: the same inputs always give the same view.

use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use std::collections::BTreeSet;

use super::category::{CategoryDetail, DEFAULT_RECENT_LIMIT, DEFAULT_TOP_MERCHANTS};
use super::flow::FlowGraph;
use super::summary::{CategoryTotal, Metrics, SpendingSummary, TopCategory};
use crate::models::{DateRange, ResolvedRange, Transaction};
use crate::services::filter::{
    apply_excluded_policy, classify, filter_by_range, resolve_range, ExcludedPolicy,
};

/// Tunables for a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub excluded_policy: ExcludedPolicy,
    pub top_merchants: usize,
    pub recent_limit: usize,
    pub top_categories: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            excluded_policy: ExcludedPolicy::default(),
            top_merchants: DEFAULT_TOP_MERCHANTS,
            recent_limit: DEFAULT_RECENT_LIMIT,
            top_categories: 10,
        }
    }
}

/// Counts over the filtered period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodStats {
    /// All transactions in the period, classified or not
    pub total_transactions: usize,
    /// Distinct non-empty categories, income categories included
    pub categories: usize,
    /// Distinct non-empty account names
    pub accounts: usize,
}

impl PeriodStats {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let categories: BTreeSet<&str> =
            transactions.iter().filter_map(|t| t.category_name()).collect();
        let accounts: BTreeSet<&str> = transactions
            .iter()
            .map(|t| t.account.as_str())
            .filter(|a| !a.is_empty())
            .collect();

        Self {
            total_transactions: transactions.len(),
            categories: categories.len(),
            accounts: accounts.len(),
        }
    }
}

/// Everything the dashboard shows for one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub range: ResolvedRange,
    pub metrics: Metrics,
    pub category_totals: Vec<CategoryTotal>,
    pub flow: FlowGraph,
    pub stats: PeriodStats,
    pub top_categories: Vec<TopCategory>,
    /// Categories available for drill-down, alphabetical
    pub categories: Vec<String>,
    pub category_detail: Option<CategoryDetail>,
}

/// Compute the dashboard view for a selection.
///
/// `today` is the reference day every relative window ends on.
pub fn compute_view(
    transactions: &[Transaction],
    selection: DateRange,
    selected_category: Option<&str>,
    today: NaiveDate,
    options: &ViewOptions,
) -> ViewModel {
    let range = resolve_range(transactions, selection, today);
    let filtered = apply_excluded_policy(
        filter_by_range(transactions, &range),
        options.excluded_policy,
    );
    debug!(
        "{} of {} transactions in {}",
        filtered.len(),
        transactions.len(),
        range
    );

    let classified = classify(&filtered);
    let summary = SpendingSummary::generate(&classified);
    let flow = FlowGraph::from_summary(&summary);

    let category_detail = selected_category.map(|category| {
        CategoryDetail::generate(
            &classified,
            category,
            options.top_merchants,
            options.recent_limit,
        )
    });

    ViewModel {
        range,
        metrics: summary.metrics,
        top_categories: summary.top_categories(options.top_categories),
        categories: summary.category_names(),
        stats: PeriodStats::from_transactions(&filtered),
        flow,
        category_detail,
        category_totals: summary.category_totals,
    }
}
