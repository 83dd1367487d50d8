//! Transaction model
//!
//! A single row of the transaction export. Records are immutable once loaded;
//! every report is derived from them without mutation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// The `type` value that marks a transaction as income
pub const INCOME_TYPE: &str = "income";

/// How a transaction participates in the aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionClass {
    /// Counts toward total income
    Income,
    /// Counts toward its category's expense total
    Expense,
    /// Non-income with no category; appears in neither total
    Unclassified,
}

impl fmt::Display for TransactionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Unclassified => write!(f, "Unclassified"),
        }
    }
}

/// A financial transaction from the export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date
    pub date: NaiveDate,

    /// Merchant or payee name
    pub name: String,

    /// Amount (positive for expense, negative for income/refund).
    /// `None` when the source value could not be read as a number.
    pub amount: Option<Money>,

    /// Raw transaction type, e.g. "income" or "regular"
    #[serde(rename = "type")]
    pub kind: String,

    /// Expense category, `None` when blank
    pub category: Option<String>,

    /// Account name
    #[serde(default)]
    pub account: String,

    /// Whether the export marked this transaction as excluded
    #[serde(default)]
    pub excluded: bool,
}

impl Transaction {
    /// Create a new transaction with the given date, name and amount.
    /// The type defaults to "regular".
    pub fn new(date: NaiveDate, name: impl Into<String>, amount: Money) -> Self {
        Self {
            date,
            name: name.into(),
            amount: Some(amount),
            kind: "regular".to_string(),
            category: None,
            account: String::new(),
            excluded: false,
        }
    }

    /// Create an income transaction
    pub fn income(date: NaiveDate, name: impl Into<String>, amount: Money) -> Self {
        Self::new(date, name, amount).with_kind(INCOME_TYPE)
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set the category; blank names are stored as `None`
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.trim().is_empty() {
            None
        } else {
            Some(category)
        };
        self
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = account.into();
        self
    }

    pub fn with_excluded(mut self, excluded: bool) -> Self {
        self.excluded = excluded;
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == INCOME_TYPE
    }

    /// Category name if present and non-empty
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// Classify the transaction from its type and category alone
    pub fn class(&self) -> TransactionClass {
        if self.is_income() {
            TransactionClass::Income
        } else if self.category_name().is_some() {
            TransactionClass::Expense
        } else {
            TransactionClass::Unclassified
        }
    }

    /// Check if this transaction falls within a date range (inclusive)
    pub fn is_in_range(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date >= start && self.date <= end
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self
            .amount
            .map(|a| a.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        write!(f, "{} {} {}", self.date.format("%Y-%m-%d"), self.name, amount)
    }
}
