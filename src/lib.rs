//! cashflow-sankey - Income and spending flow dashboard for transaction exports
//!
//! This library loads a CSV export of personal finance transactions, filters
//! it to a date range, splits it into income and expenses, and aggregates the
//! result into the data a Sankey-style flow dashboard needs.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, transactions, date ranges)
//! - `services`: Loading, caching, filtering and classification
//! - `reports`: Metrics, category and merchant totals, flow graph, view model
//! - `display`: Terminal rendering of a view
//! - `export`: JSON, YAML and CSV export of a view
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use sankey::models::DateRange;
//! use sankey::reports::{compute_view, ViewOptions};
//! use sankey::services::Loader;
//!
//! let data = Loader::new().load_path(std::path::Path::new("transactions.csv"))?;
//! let today = chrono::Local::now().date_naive();
//! let view = compute_view(&data.transactions, DateRange::LastMonth, None, today, &ViewOptions::default());
//! println!("Savings rate: {:.2}%", view.metrics.savings_rate);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;

pub use error::SankeyError;
