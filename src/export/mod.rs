//! Export module for cashflow-sankey
//!
//! Hands a computed dashboard view to external tools:
//! - JSON: machine-readable view for chart renderers
//! - YAML: human-readable view
//! - CSV: category totals and transaction listings

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_category_totals_csv, export_transactions_csv};
pub use json::{
    export_view_json, ChartData, ChartLink, ViewExport, AMOUNT_UNIT, EXPORT_SCHEMA_VERSION,
};
pub use yaml::export_view_yaml;
