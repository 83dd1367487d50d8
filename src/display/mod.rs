//! Display formatting for terminal output
//!
//! Provides utilities for rendering dashboard views in the terminal,
//! including tables, bars and color hints.

pub mod dashboard;
pub mod report;

pub use dashboard::{format_category_detail, format_category_list, format_dashboard, format_flow};
