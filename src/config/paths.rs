//! Path management for cashflow-sankey
//!
//! ## Path Resolution Order
//!
//! 1. `CASHFLOW_SANKEY_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/cashflow-sankey` or `~/.config/cashflow-sankey`
//! 3. Windows: `%APPDATA%\cashflow-sankey`

use std::path::PathBuf;

use crate::error::SankeyError;

/// Environment variable overriding the base directory
pub const DIR_ENV_VAR: &str = "CASHFLOW_SANKEY_DIR";

const APP_DIR_NAME: &str = "cashflow-sankey";

/// Manages all paths used by cashflow-sankey
#[derive(Debug, Clone)]
pub struct SankeyPaths {
    /// Base directory for configuration
    base_dir: PathBuf,
}

impl SankeyPaths {
    /// Create a new SankeyPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SankeyError> {
        let base_dir = match std::env::var(DIR_ENV_VAR) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create SankeyPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/cashflow-sankey/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), SankeyError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SankeyError::Io(format!("Failed to create config directory: {}", e)))
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default config directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SankeyError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                SankeyError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join(APP_DIR_NAME))
}

/// Resolve the default config directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SankeyError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SankeyError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join(APP_DIR_NAME))
}
