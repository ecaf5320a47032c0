//! SQL text for the catalog store.

pub mod builder;

pub use builder::{order_by_clause, select_catalog};
