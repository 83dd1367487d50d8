//! Reports module for cashflow-sankey
//!
//! Aggregates over a filtered period: the spending summary and metrics, the
//! income flow graph, per-category drill-downs and the combined dashboard view.

pub mod category;
pub mod flow;
pub mod summary;
pub mod view;

pub use category::{
    CategoryDetail, LabeledValue, MerchantBreakdown, MerchantTotal, RecentTransaction,
};
pub use flow::{FlowEdge, FlowGraph, FlowNode, NodeKind};
pub use summary::{CategoryTotal, Metrics, SpendingSummary, TopCategory};
pub use view::{compute_view, PeriodStats, ViewModel, ViewOptions};
