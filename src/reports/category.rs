//! Category drill-down
//!
//! Summary figures, top merchants and the most recent transactions for a
//! single expense category.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Money, Transaction};
use crate::services::filter::Classified;

/// Default number of merchants in a breakdown
pub const DEFAULT_TOP_MERCHANTS: usize = 10;

/// Default number of rows in the recent transaction listing
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Spending at one merchant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MerchantTotal {
    pub name: String,
    pub total: Money,
    pub transaction_count: usize,
}

/// A labelled slice for a pie chart, in currency units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: f64,
}

/// Largest merchants within a category, charges only
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MerchantBreakdown {
    pub category: String,
    pub merchants: Vec<MerchantTotal>,
}

impl MerchantBreakdown {
    /// Build the breakdown for `category`.
    ///
    /// Only strictly positive amounts count, so refunds never rank a
    /// merchant. Sorted by total, largest first, ties in first-seen order.
    pub fn generate(classified: &Classified<'_>, category: &str, limit: usize) -> Self {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut merchants: Vec<MerchantTotal> = Vec::new();

        for txn in classified.expenses_in(category) {
            let Some(amount) = txn.amount.filter(|a| a.is_positive()) else {
                continue;
            };

            let idx = *positions.entry(txn.name.as_str()).or_insert_with(|| {
                merchants.push(MerchantTotal {
                    name: txn.name.clone(),
                    total: Money::zero(),
                    transaction_count: 0,
                });
                merchants.len() - 1
            });
            merchants[idx].total += amount;
            merchants[idx].transaction_count += 1;
        }

        merchants.sort_by(|a, b| b.total.cmp(&a.total));
        merchants.truncate(limit);

        Self {
            category: category.to_string(),
            merchants,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.merchants.is_empty()
    }

    /// Sum of the listed merchant totals
    pub fn total(&self) -> Money {
        self.merchants.iter().map(|m| m.total).sum()
    }

    /// Label/value pairs for a pie chart
    pub fn labeled_values(&self) -> Vec<LabeledValue> {
        self.merchants
            .iter()
            .map(|m| LabeledValue {
                label: m.name.clone(),
                value: m.total.as_f64(),
            })
            .collect()
    }

    /// Each merchant's share of the listed total, in percent
    pub fn shares(&self) -> Vec<f64> {
        let total = self.total();
        self.merchants
            .iter()
            .map(|m| m.total.percent_of(total))
            .collect()
    }
}

/// A row of the recent transaction listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentTransaction {
    pub date: NaiveDate,
    pub name: String,
    pub amount: Option<Money>,
    pub account: String,
}

impl From<&Transaction> for RecentTransaction {
    fn from(txn: &Transaction) -> Self {
        Self {
            date: txn.date,
            name: txn.name.clone(),
            amount: txn.amount,
            account: txn.account.clone(),
        }
    }
}

/// Drill-down for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDetail {
    pub category: String,
    /// Signed sum of the category's amounts
    pub total: Money,
    pub transaction_count: usize,
    /// Total divided by transaction count, zero when empty
    pub average: Money,
    pub merchants: MerchantBreakdown,
    /// Newest first
    pub recent: Vec<RecentTransaction>,
}

impl CategoryDetail {
    pub fn generate(
        classified: &Classified<'_>,
        category: &str,
        top_merchants: usize,
        recent_limit: usize,
    ) -> Self {
        let transactions: Vec<&Transaction> = classified.expenses_in(category).collect();
        let total: Money = transactions.iter().filter_map(|t| t.amount).sum();
        let transaction_count = transactions.len();
        let average = if transaction_count == 0 {
            Money::zero()
        } else {
            Money::from_cents((total.cents() as f64 / transaction_count as f64).round() as i64)
        };

        Self {
            category: category.to_string(),
            total,
            transaction_count,
            average,
            merchants: MerchantBreakdown::generate(classified, category, top_merchants),
            recent: recent_transactions(&transactions, recent_limit),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}

/// Newest transactions first; same-day rows keep input order
pub fn recent_transactions(transactions: &[&Transaction], limit: usize) -> Vec<RecentTransaction> {
    let mut sorted: Vec<&Transaction> = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
        .into_iter()
        .take(limit)
        .map(RecentTransaction::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::filter::classify;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn food(day: u32, name: &str, cents: i64) -> Transaction {
        Transaction::new(date(2026, 1, day), name, Money::from_cents(cents))
            .with_category("Food")
            .with_account("Card")
    }

    #[test]
    fn test_merchant_breakdown_excludes_refunds() {
        let txns = vec![
            food(1, "Grocer", 5000),
            food(2, "Grocer", -2000),
            food(3, "Bakery", 800),
            food(4, "Refund Only", -999),
            food(5, "Bakery", 700),
        ];
        let breakdown = MerchantBreakdown::generate(&classify(&txns), "Food", 10);

        let names: Vec<_> = breakdown.merchants.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Grocer", "Bakery"]);
        assert_eq!(breakdown.merchants[0].total, Money::from_cents(5000));
        assert_eq!(breakdown.merchants[1].total, Money::from_cents(1500));
        assert_eq!(breakdown.merchants[1].transaction_count, 2);
        assert!(breakdown.merchants.iter().all(|m| m.total.is_positive()));
    }

    #[test]
    fn test_merchant_breakdown_caps_at_limit() {
        let txns: Vec<_> = (1..=15)
            .map(|i| food(i, &format!("Merchant {}", i), i as i64 * 100))
            .collect();
        let breakdown =
            MerchantBreakdown::generate(&classify(&txns), "Food", DEFAULT_TOP_MERCHANTS);

        assert_eq!(breakdown.merchants.len(), 10);
        assert_eq!(breakdown.merchants[0].name, "Merchant 15");
        assert_eq!(breakdown.merchants[9].name, "Merchant 6");
    }

    #[test]
    fn test_merchant_breakdown_other_category_empty() {
        let txns = vec![food(1, "Grocer", 5000)];
        let breakdown = MerchantBreakdown::generate(&classify(&txns), "Travel", 10);
        assert!(breakdown.is_empty());
        assert!(breakdown.shares().is_empty());
    }

    #[test]
    fn test_labeled_values_and_shares() {
        let txns = vec![food(1, "Grocer", 7500), food(2, "Bakery", 2500)];
        let breakdown = MerchantBreakdown::generate(&classify(&txns), "Food", 10);
        assert_eq!(
            breakdown.labeled_values(),
            vec![
                LabeledValue {
                    label: "Grocer".to_string(),
                    value: 75.0
                },
                LabeledValue {
                    label: "Bakery".to_string(),
                    value: 25.0
                },
            ]
        );
        assert_eq!(breakdown.shares(), vec![75.0, 25.0]);
    }

    #[test]
    fn test_category_detail_summary() {
        let txns = vec![
            food(1, "Grocer", 10000),
            food(2, "Grocer", -3000),
            food(3, "Bakery", 500),
        ];
        let detail = CategoryDetail::generate(&classify(&txns), "Food", 10, 20);

        assert_eq!(detail.total, Money::from_cents(7500));
        assert_eq!(detail.transaction_count, 3);
        assert_eq!(detail.average, Money::from_cents(2500));
        assert!(!detail.is_empty());
    }

    #[test]
    fn test_category_detail_empty() {
        let txns: Vec<Transaction> = Vec::new();
        let detail = CategoryDetail::generate(&classify(&txns), "Food", 10, 20);
        assert!(detail.is_empty());
        assert_eq!(detail.average, Money::zero());
        assert!(detail.recent.is_empty());
    }

    #[test]
    fn test_recent_sorted_newest_first_and_capped() {
        let txns: Vec<_> = (1..=25).map(|d| food(d, "Grocer", 100)).collect();
        let detail = CategoryDetail::generate(&classify(&txns), "Food", 10, DEFAULT_RECENT_LIMIT);

        assert_eq!(detail.recent.len(), 20);
        assert_eq!(detail.recent[0].date, date(2026, 1, 25));
        assert_eq!(detail.recent[19].date, date(2026, 1, 6));
        assert_eq!(detail.recent[0].account, "Card");
    }

    #[test]
    fn test_recent_keeps_input_order_on_same_day() {
        let txns = vec![food(3, "First", 100), food(3, "Second", 200), food(1, "Older", 50)];
        let refs: Vec<&Transaction> = txns.iter().collect();
        let recent = recent_transactions(&refs, 20);
        let names: Vec<_> = recent.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Older"]);
    }
}
