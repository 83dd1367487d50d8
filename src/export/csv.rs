//! CSV Export functionality
//!
//! Exports category totals and a category's transaction listing in a
//! spreadsheet-compatible format.

use crate::error::SankeyResult;
use crate::reports::{RecentTransaction, ViewModel};
use std::io::Write;

/// Export category totals with their share of income
pub fn export_category_totals_csv<W: Write>(view: &ViewModel, writer: W) -> SankeyResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "Start Date",
        "End Date",
        "Category",
        "Amount",
        "Transaction Count",
        "Percent Of Income",
    ])?;

    let start = view.range.start.to_string();
    let end = view.range.end.to_string();
    let income = view.metrics.total_income;

    for category in &view.category_totals {
        wtr.write_record(&[
            start.clone(),
            end.clone(),
            category.category.clone(),
            format!("{:.2}", category.total.as_f64()),
            category.transaction_count.to_string(),
            format!("{:.2}", category.total.percent_of(income)),
        ])?;
    }

    let count: usize = view.category_totals.iter().map(|c| c.transaction_count).sum();
    wtr.write_record(&[
        start,
        end,
        "TOTAL".to_string(),
        format!("{:.2}", view.metrics.total_expenses.as_f64()),
        count.to_string(),
        format!("{:.2}", view.metrics.total_expenses.percent_of(income)),
    ])?;

    wtr.flush()?;
    Ok(())
}

/// Export a transaction listing; missing amounts are left blank
pub fn export_transactions_csv<W: Write>(
    transactions: &[RecentTransaction],
    writer: W,
) -> SankeyResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["date", "name", "amount", "account"])?;

    for txn in transactions {
        let amount = txn
            .amount
            .map(|a| format!("{:.2}", a.as_f64()))
            .unwrap_or_default();
        wtr.write_record([
            txn.date.to_string().as_str(),
            txn.name.as_str(),
            amount.as_str(),
            txn.account.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
