//! Core data models for cashflow-sankey
//!
//! This module contains the data structures loaded from a transaction export:
//! transactions, money amounts and date range selections.

pub mod date_range;
pub mod money;
pub mod transaction;

pub use date_range::{DateRange, ResolvedRange};
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionClass, INCOME_TYPE};
