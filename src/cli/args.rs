//! Shared arguments for commands that compute a dashboard view
//!
//! Every view command reads an export file, picks a date range and a
//! reference day, then runs `compute_view` on the loaded transactions.

use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::error::{SankeyError, SankeyResult};
use crate::models::DateRange;
use crate::reports::{compute_view, ViewModel};
use crate::services::{ExcludedPolicy, LoadCache, ParseWarning};

/// Input selection shared by the view commands
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Path to the transaction export (CSV)
    pub file: PathBuf,

    /// Date range: all, week, month, 60d, 90d, 6m, year
    #[arg(short, long)]
    pub range: Option<DateRange>,

    /// Reference day the range ends on (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub today: Option<NaiveDate>,

    /// Count transactions flagged as excluded
    #[arg(long)]
    pub include_excluded: bool,
}

impl ViewArgs {
    /// Date range to use, falling back to the configured default
    pub fn selection(&self, settings: &Settings) -> DateRange {
        self.range.unwrap_or(settings.default_range)
    }

    pub fn reference_day(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// A computed view with details about its source
#[derive(Debug, Clone)]
pub struct LoadedView {
    pub view: ViewModel,
    pub warnings: Vec<ParseWarning>,
    pub source_hash: String,
}

/// Load the export named in `args` and compute its view
pub fn build_view(
    cache: &mut LoadCache,
    settings: &Settings,
    args: &ViewArgs,
    category: Option<&str>,
) -> SankeyResult<LoadedView> {
    let bytes = std::fs::read(&args.file).map_err(|e| {
        SankeyError::Io(format!("Failed to read {}: {}", args.file.display(), e))
    })?;

    let mut options = settings.view_options();
    if args.include_excluded {
        options.excluded_policy = ExcludedPolicy::Keep;
    }

    let data = cache.load(&bytes)?;
    let view = compute_view(
        &data.transactions,
        args.selection(settings),
        category,
        args.reference_day(),
        &options,
    );
    let warnings = data.warnings.clone();
    let source_hash = cache.current_key().unwrap_or_default().to_string();

    Ok(LoadedView {
        view,
        warnings,
        source_hash,
    })
}

/// Print a summary of loader warnings to stderr
pub fn report_warnings(warnings: &[ParseWarning]) {
    let (unreadable, rounded): (Vec<&ParseWarning>, Vec<&ParseWarning>) =
        warnings.iter().partition(|w| w.is_unreadable());

    if let Some(first) = unreadable.first() {
        eprintln!(
            "Warning: {} value(s) could not be read and were treated as missing (first: {})",
            unreadable.len(),
            first
        );
    }
    if let Some(first) = rounded.first() {
        eprintln!(
            "Warning: {} amount(s) had more than two decimals and were rounded (first: {})",
            rounded.len(),
            first
        );
    }
}
