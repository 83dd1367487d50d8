//! Service layer for cashflow-sankey
//!
//! Loading, caching, date filtering and classification of transactions.

pub mod cache;
pub mod filter;
pub mod loader;

pub use cache::{content_hash, LoadCache};
pub use filter::{
    classify, earliest_date, filter_by_range, latest_date, resolve_range, Classified,
    ExcludedPolicy,
};
pub use loader::{LoadedData, Loader, ParseWarning, WarningKind, REQUIRED_COLUMNS};
