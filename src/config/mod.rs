//! Configuration module for cashflow-sankey
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SankeyPaths;
pub use settings::Settings;
