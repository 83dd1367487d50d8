//! YAML Export functionality
//!
//! Writes a dashboard view as YAML for human-readable inspection.

use crate::error::{SankeyError, SankeyResult};
use crate::export::json::ViewExport;
use std::io::Write;

/// Export a view to YAML
pub fn export_view_yaml<W: Write>(export: &ViewExport<'_>, writer: &mut W) -> SankeyResult<()> {
    writeln!(writer, "# cashflow-sankey view export")
        .map_err(|e| SankeyError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| SankeyError::Export(e.to_string()))?;
    writeln!(writer, "# Range: {}", export.view.range)
        .map_err(|e| SankeyError::Export(e.to_string()))?;
    writeln!(
        writer,
        "# Amounts under view are in {}; charts use currency units",
        export.amount_unit
    )
    .map_err(|e| SankeyError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| SankeyError::Export(e.to_string()))?;

    Ok(())
}
