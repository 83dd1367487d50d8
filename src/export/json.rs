//! JSON Export functionality
//!
//! Writes a dashboard view as JSON for an external chart renderer.

use crate::error::{SankeyError, SankeyResult};
use crate::reports::{LabeledValue, ViewModel};
use crate::services::ParseWarning;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.1.0";

/// Unit of every `Money` value under `view`
pub const AMOUNT_UNIT: &str = "cents";

/// A flow edge with its value in currency units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLink {
    pub source: usize,
    pub target: usize,
    pub value: f64,
}

/// Chart-ready series in currency units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Flow node labels in index order
    pub flow_labels: Vec<String>,
    pub flow_links: Vec<ChartLink>,
    /// Merchant slices of the selected category, empty without a selection
    pub merchant_pie: Vec<LabeledValue>,
}

impl ChartData {
    pub fn from_view(view: &ViewModel) -> Self {
        Self {
            flow_labels: view.flow.labels().into_iter().map(String::from).collect(),
            flow_links: view
                .flow
                .edges
                .iter()
                .map(|e| ChartLink {
                    source: e.source,
                    target: e.target,
                    value: e.value.as_f64(),
                })
                .collect(),
            merchant_pie: view
                .category_detail
                .as_ref()
                .map(|d| d.merchants.labeled_values())
                .unwrap_or_default(),
        }
    }
}

/// A dashboard view wrapped with provenance metadata
#[derive(Debug, Clone, Serialize)]
pub struct ViewExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    /// SHA-256 of the source file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<&'a str>,

    /// Cells the loader could not read or had to round
    pub warnings: &'a [ParseWarning],

    /// Unit of the amounts under `view`
    pub amount_unit: &'static str,

    pub view: &'a ViewModel,

    pub charts: ChartData,
}

impl<'a> ViewExport<'a> {
    pub fn new(view: &'a ViewModel) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            source_hash: None,
            warnings: &[],
            amount_unit: AMOUNT_UNIT,
            view,
            charts: ChartData::from_view(view),
        }
    }

    pub fn with_source_hash(mut self, hash: &'a str) -> Self {
        self.source_hash = Some(hash);
        self
    }

    pub fn with_warnings(mut self, warnings: &'a [ParseWarning]) -> Self {
        self.warnings = warnings;
        self
    }
}

/// Export a view to JSON
pub fn export_view_json<W: Write>(
    export: &ViewExport<'_>,
    writer: &mut W,
    pretty: bool,
) -> SankeyResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| SankeyError::Export(e.to_string()))?;

    Ok(())
}
