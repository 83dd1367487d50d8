//! Income flow graph
//!
//! Node/edge structure for a Sankey-style chart: income on the left, flowing
//! into savings (when positive) and each expense category.

use serde::Serialize;

use super::summary::SpendingSummary;
use crate::models::Money;

/// Index of the income node; every edge starts here
pub const INCOME_NODE: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Income,
    Savings,
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    pub kind: NodeKind,
    /// Bare node name, e.g. "Food"
    pub name: String,
    /// Display label with share of income, e.g. "Food (1.71%)"
    pub label: String,
    pub value: Money,
    pub percent_of_income: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowEdge {
    pub source: usize,
    pub target: usize,
    pub value: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// Build the graph from a spending summary
    pub fn from_summary(summary: &SpendingSummary) -> Self {
        let income = summary.metrics.total_income;
        let savings = summary.metrics.savings;

        let mut graph = Self {
            nodes: vec![FlowNode {
                kind: NodeKind::Income,
                name: "Income".to_string(),
                label: "Income".to_string(),
                value: income,
                percent_of_income: if income.is_positive() { 100.0 } else { 0.0 },
            }],
            edges: Vec::new(),
        };

        if savings.is_positive() {
            graph.push_target(NodeKind::Savings, "Savings", savings, income);
        }

        for category in &summary.category_totals {
            graph.push_target(NodeKind::Category, &category.category, category.total, income);
        }

        graph
    }

    fn push_target(&mut self, kind: NodeKind, name: &str, value: Money, income: Money) {
        let percent = value.percent_of(income);
        self.nodes.push(FlowNode {
            kind,
            name: name.to_string(),
            label: format!("{} ({:.2}%)", name, percent),
            value,
            percent_of_income: percent,
        });
        self.edges.push(FlowEdge {
            source: INCOME_NODE,
            target: self.nodes.len() - 1,
            value,
        });
    }

    pub fn has_savings(&self) -> bool {
        self.nodes.iter().any(|n| n.kind == NodeKind::Savings)
    }

    /// Node labels in index order
    pub fn labels(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.label.as_str()).collect()
    }
}
