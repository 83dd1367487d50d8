//! CLI command for exporting a dashboard view
//!
//! Writes the computed view as JSON or YAML for chart renderers, or the
//! category totals as CSV for spreadsheets.

use super::args::{build_view, report_warnings, ViewArgs};
use crate::config::settings::Settings;
use crate::error::{SankeyError, SankeyResult};
use crate::export::{
    export_category_totals_csv, export_transactions_csv, export_view_json, export_view_yaml,
    ViewExport,
};
use crate::services::LoadCache;
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (category totals, or the category listing with --category)
    Csv,
    /// JSON format (full view)
    Json,
    /// YAML format (full view, human-readable)
    Yaml,
}

/// Options for the export command
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include the drill-down for this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the export command
pub fn handle_export(
    cache: &mut LoadCache,
    settings: &Settings,
    args: &ExportArgs,
) -> SankeyResult<()> {
    let loaded = build_view(cache, settings, &args.view, args.category.as_deref())?;
    report_warnings(&loaded.warnings);

    let mut writer = open_output(args.output.as_ref())?;

    match args.format {
        ExportFormat::Csv => match &loaded.view.category_detail {
            Some(detail) => export_transactions_csv(&detail.recent, &mut writer)?,
            None => export_category_totals_csv(&loaded.view, &mut writer)?,
        },
        ExportFormat::Json => {
            let export = ViewExport::new(&loaded.view)
                .with_source_hash(&loaded.source_hash)
                .with_warnings(&loaded.warnings);
            export_view_json(&export, &mut writer, args.pretty)?;
            writeln!(writer)?;
        }
        ExportFormat::Yaml => {
            let export = ViewExport::new(&loaded.view)
                .with_source_hash(&loaded.source_hash)
                .with_warnings(&loaded.warnings);
            export_view_yaml(&export, &mut writer)?;
        }
    }

    writer
        .flush()
        .map_err(|e| SankeyError::Export(format!("Failed to write export: {}", e)))?;

    if let Some(output) = &args.output {
        println!("View exported to: {}", output.display());
    }

    Ok(())
}

fn open_output(output: Option<&PathBuf>) -> SankeyResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                SankeyError::Export(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateRange;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    const EXPORT: &str = "\
date,name,amount,type,category,account,excluded
2026-01-01,Salary,-5000.00,income,Salary,Checking,false
2026-01-02,Grocery Store,85.50,regular,Food & Dining,Credit Card,false
2026-01-03,Landlord,1500.00,regular,Rent,Checking,false
";

    fn export_args(dir: &TempDir, format: ExportFormat, output: &str) -> ExportArgs {
        let input = dir.path().join("transactions.csv");
        std::fs::write(&input, EXPORT).unwrap();
        ExportArgs {
            view: ViewArgs {
                file: input,
                range: Some(DateRange::AllTime),
                today: NaiveDate::from_ymd_opt(2026, 1, 31),
                include_excluded: false,
            },
            format,
            output: Some(dir.path().join(output)),
            category: None,
            pretty: true,
        }
    }

    #[test]
    fn test_export_json_file() {
        let dir = TempDir::new().unwrap();
        let args = export_args(&dir, ExportFormat::Json, "view.json");
        handle_export(&mut LoadCache::new(), &Settings::default(), &args).unwrap();

        let contents = std::fs::read_to_string(dir.path().join("view.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["view"]["metrics"]["total_income"], 500000);
        assert_eq!(value["source_hash"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn test_export_csv_totals() {
        let dir = TempDir::new().unwrap();
        let args = export_args(&dir, ExportFormat::Csv, "totals.csv");
        handle_export(&mut LoadCache::new(), &Settings::default(), &args).unwrap();

        let contents = std::fs::read_to_string(dir.path().join("totals.csv")).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert!(lines[1].contains("Rent"));
        assert!(lines[2].contains("Food & Dining"));
    }

    #[test]
    fn test_export_csv_category_listing() {
        let dir = TempDir::new().unwrap();
        let mut args = export_args(&dir, ExportFormat::Csv, "food.csv");
        args.category = Some("Food & Dining".to_string());
        handle_export(&mut LoadCache::new(), &Settings::default(), &args).unwrap();

        let contents = std::fs::read_to_string(dir.path().join("food.csv")).unwrap();
        assert!(contents.starts_with("date,name,amount,account"));
        assert!(contents.contains("2026-01-02,Grocery Store,85.50,Credit Card"));
    }

    #[test]
    fn test_export_bad_output_path() {
        let dir = TempDir::new().unwrap();
        let mut args = export_args(&dir, ExportFormat::Yaml, "view.yaml");
        args.output = Some(dir.path().join("missing").join("view.yaml"));

        let err = handle_export(&mut LoadCache::new(), &Settings::default(), &args).unwrap_err();
        assert!(matches!(err, SankeyError::Export(_)));
    }
}
