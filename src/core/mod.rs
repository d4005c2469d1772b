//! Core business logic - framework-agnostic inventory operations.
//!
//! `product`, `sale` and `stock_entry` hold the consistency engine: the only
//! code that changes a product's quantity, always in the same store
//! transaction as the log record that explains the change. `report`, `filter`
//! and `export` are pure functions over record slices.

/// CSV export of sales history
pub mod export;
/// Text and calendar-day filtering plus newest-first sorting
pub mod filter;
/// Authenticated owner context
pub mod owner;
/// Product creation, restocking, deletion and lookup
pub mod product;
/// Aggregations and summaries
pub mod report;
/// Sale recording and listing
pub mod sale;
/// Stock entry log
pub mod stock_entry;

pub use owner::OwnerId;
