//! User settings for cashflow-sankey
//!
//! Manages dashboard preferences: the default date range, how excluded
//! transactions are treated, list sizes and the currency symbol.

use serde::{Deserialize, Serialize};

use super::paths::SankeyPaths;
use crate::error::SankeyError;
use crate::models::DateRange;
use crate::reports::category::{DEFAULT_RECENT_LIMIT, DEFAULT_TOP_MERCHANTS};
use crate::reports::ViewOptions;
use crate::services::{ExcludedPolicy, Loader};

/// User settings for cashflow-sankey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Date range used when none is given on the command line
    #[serde(default)]
    pub default_range: DateRange,

    /// Whether transactions flagged as excluded are dropped
    #[serde(default)]
    pub excluded_policy: ExcludedPolicy,

    /// Number of merchants in a category breakdown
    #[serde(default = "default_top_merchants")]
    pub top_merchants: usize,

    /// Number of rows in the recent transaction listing
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Number of categories in the top categories table
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// chrono format tried first for the date column
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_top_merchants() -> usize {
    DEFAULT_TOP_MERCHANTS
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

fn default_top_categories() -> usize {
    10
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_range: DateRange::default(),
            excluded_policy: ExcludedPolicy::default(),
            top_merchants: default_top_merchants(),
            recent_limit: default_recent_limit(),
            top_categories: default_top_categories(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &SankeyPaths) -> Result<Self, SankeyError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SankeyError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SankeyError::Config(format!("Failed to parse settings file: {}", e))
            })?;
            settings.validate()?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SankeyPaths) -> Result<(), SankeyError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SankeyError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            SankeyError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Reject settings that would produce an empty dashboard
    pub fn validate(&self) -> Result<(), SankeyError> {
        for (name, value) in [
            ("top_merchants", self.top_merchants),
            ("recent_limit", self.recent_limit),
            ("top_categories", self.top_categories),
        ] {
            if value == 0 {
                return Err(SankeyError::Validation(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }

        if self.date_format.trim().is_empty() {
            return Err(SankeyError::Validation(
                "date_format cannot be empty".into(),
            ));
        }

        Ok(())
    }

    /// Loader configured with the preferred date format
    pub fn loader(&self) -> Loader {
        Loader::new().with_date_format(&self.date_format)
    }

    /// Options for `compute_view` derived from these settings
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            excluded_policy: self.excluded_policy,
            top_merchants: self.top_merchants,
            recent_limit: self.recent_limit,
            top_categories: self.top_categories,
        }
    }
}
