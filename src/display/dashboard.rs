//! Dashboard display formatting
//!
//! Renders a `ViewModel` for the terminal: headline metrics, the income flow
//! as bars, the top categories table and the category drill-down.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{
    double_separator, format_bar, format_money_colored, format_optional_money, format_percentage,
    separator, truncate,
};
use crate::reports::{CategoryDetail, FlowGraph, NodeKind, ViewModel};

const WIDTH: usize = 72;
const BAR_WIDTH: usize = 24;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Percentage")]
    percentage: String,
}

#[derive(Tabled)]
struct MerchantRow {
    #[tabled(rename = "Merchant")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Account")]
    account: String,
}

/// Format the full dashboard
pub fn format_dashboard(view: &ViewModel, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Cash Flow: {} ({} to {})\n",
        view.range.selection, view.range.start, view.range.end
    ));
    output.push_str(&double_separator(WIDTH));
    output.push('\n');

    let m = &view.metrics;
    output.push_str(&format!(
        "{:<16}{}\n",
        "Income:",
        m.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<16}{}\n",
        "Expenses:",
        m.total_expenses.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<16}{}\n",
        "Savings:",
        format_money_colored(m.savings, symbol)
    ));
    output.push_str(&format!(
        "{:<16}{}\n\n",
        "Savings Rate:",
        format_percentage(m.savings_rate)
    ));

    output.push_str("Income Flow\n");
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format_flow(&view.flow, symbol));
    output.push('\n');

    output.push_str(&format!(
        "Total Transactions: {}   Categories: {}   Accounts: {}\n\n",
        view.stats.total_transactions, view.stats.categories, view.stats.accounts
    ));

    output.push_str("Top Expense Categories\n");
    if view.top_categories.is_empty() {
        output.push_str("No expense categories in this period.\n");
    } else {
        let rows = view.top_categories.iter().map(|c| CategoryRow {
            category: c.category.clone(),
            amount: c.total.format_with_symbol(symbol),
            percentage: format_percentage(c.percent_of_income),
        });
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push('\n');
    }

    if let Some(detail) = &view.category_detail {
        output.push('\n');
        output.push_str(&format_category_detail(detail, symbol));
    }

    output
}

/// Format the flow graph as one bar per edge, scaled to income
pub fn format_flow(flow: &FlowGraph, symbol: &str) -> String {
    if flow.edges.is_empty() {
        return "No income or expenses in this period.\n".to_string();
    }

    let max = flow
        .edges
        .iter()
        .map(|e| e.value.as_f64())
        .fold(flow.nodes[0].value.as_f64(), f64::max);

    let mut output = String::new();
    for edge in &flow.edges {
        let Some(node) = flow.nodes.get(edge.target) else {
            continue;
        };
        let marker = match node.kind {
            NodeKind::Savings => "*",
            _ => " ",
        };
        output.push_str(&format!(
            "{}{:<30} {} {:>14}\n",
            marker,
            truncate(&node.label, 30),
            format_bar(edge.value.as_f64(), max, BAR_WIDTH),
            edge.value.format_with_symbol(symbol)
        ));
    }
    output
}

/// Format the drill-down for one category
pub fn format_category_detail(detail: &CategoryDetail, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", detail.category));
    output.push_str(&separator(WIDTH));
    output.push('\n');

    if detail.is_empty() {
        output.push_str("No transactions in this category for the selected period.\n");
        return output;
    }

    output.push_str(&format!(
        "Total Spent: {}   Transactions: {}   Avg Transaction: {}\n\n",
        detail.total.format_with_symbol(symbol),
        detail.transaction_count,
        detail.average.format_with_symbol(symbol)
    ));

    output.push_str(&format!("Top Merchants/Payees in {}\n", detail.category));
    if detail.merchants.is_empty() {
        output.push_str("No charges in this category (refunds only).\n");
    } else {
        let shares = detail.merchants.shares();
        let rows = detail
            .merchants
            .merchants
            .iter()
            .zip(shares)
            .map(|(m, share)| MerchantRow {
                name: m.name.clone(),
                amount: m.total.format_with_symbol(symbol),
                count: m.transaction_count,
                share: format_percentage(share),
            });
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push('\n');
    }

    output.push_str("\nRecent Transactions\n");
    let rows = detail.recent.iter().map(|t| TransactionRow {
        date: t.date.format("%Y-%m-%d").to_string(),
        name: t.name.clone(),
        amount: format_optional_money(t.amount, symbol),
        account: t.account.clone(),
    });
    output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    output.push('\n');

    output
}

/// Format the list of categories available for drill-down
pub fn format_category_list(categories: &[String]) -> String {
    if categories.is_empty() {
        return "No expense categories in this period.\n".to_string();
    }

    let mut output = String::new();
    for category in categories {
        output.push_str(&format!("  {}\n", category));
    }
    output
}
