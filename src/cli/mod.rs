//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the loader and report layers.

pub mod args;
pub mod dashboard;
pub mod export;

pub use args::{build_view, LoadedView, ViewArgs};
pub use dashboard::{handle_categories, handle_category, handle_dashboard};
pub use export::{handle_export, ExportArgs, ExportFormat};
