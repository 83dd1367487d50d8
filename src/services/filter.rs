//! Date filtering and classification
//!
//! Each step returns a new view of the input; the loaded transactions are
//! never modified.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{DateRange, ResolvedRange, Transaction, TransactionClass};

/// What to do with transactions the export marks as excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExcludedPolicy {
    /// Remove them before any aggregation
    #[default]
    Drop,
    /// Treat them like any other transaction
    Keep,
}

impl fmt::Display for ExcludedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drop => write!(f, "drop"),
            Self::Keep => write!(f, "keep"),
        }
    }
}

impl FromStr for ExcludedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "keep" => Ok(Self::Keep),
            other => Err(format!("Unknown excluded policy '{}'. Use drop or keep", other)),
        }
    }
}

/// Earliest transaction date, if any
pub fn earliest_date(transactions: &[Transaction]) -> Option<NaiveDate> {
    transactions.iter().map(|t| t.date).min()
}

/// Latest transaction date, if any
pub fn latest_date(transactions: &[Transaction]) -> Option<NaiveDate> {
    transactions.iter().map(|t| t.date).max()
}

/// Resolve a selection against the loaded data
pub fn resolve_range(
    transactions: &[Transaction],
    selection: DateRange,
    today: NaiveDate,
) -> ResolvedRange {
    let range = selection.resolve(earliest_date(transactions), today);
    debug!("resolved date range: {}", range);
    range
}

/// Keep transactions dated within `range`, inclusive on both ends
pub fn filter_by_range(transactions: &[Transaction], range: &ResolvedRange) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| range.contains(t.date))
        .cloned()
        .collect()
}

/// Apply the excluded-flag policy
pub fn apply_excluded_policy(
    transactions: Vec<Transaction>,
    policy: ExcludedPolicy,
) -> Vec<Transaction> {
    match policy {
        ExcludedPolicy::Keep => transactions,
        ExcludedPolicy::Drop => {
            let before = transactions.len();
            let kept: Vec<Transaction> =
                transactions.into_iter().filter(|t| !t.excluded).collect();
            if kept.len() != before {
                debug!("dropped {} excluded transactions", before - kept.len());
            }
            kept
        }
    }
}

/// Transactions split by how they count toward the totals
#[derive(Debug, Clone, Default)]
pub struct Classified<'a> {
    pub income: Vec<&'a Transaction>,
    pub expenses: Vec<&'a Transaction>,
    pub unclassified: Vec<&'a Transaction>,
}

impl<'a> Classified<'a> {
    /// Expense-eligible transactions in one category
    pub fn expenses_in(&self, category: &str) -> impl Iterator<Item = &'a Transaction> + '_ {
        let category = category.to_string();
        self.expenses
            .iter()
            .copied()
            .filter(move |t| t.category_name() == Some(category.as_str()))
    }
}

/// Partition transactions into income, expense-eligible and unclassified.
/// Input order is preserved within each group.
pub fn classify(transactions: &[Transaction]) -> Classified<'_> {
    let mut classified = Classified::default();
    for txn in transactions {
        match txn.class() {
            TransactionClass::Income => classified.income.push(txn),
            TransactionClass::Expense => classified.expenses.push(txn),
            TransactionClass::Unclassified => classified.unclassified.push(txn),
        }
    }
    classified
}
