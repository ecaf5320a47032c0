//! Catalog query engine: sorting, searching and display enrichment.

mod engine;
pub mod search;
pub mod sort;

pub use engine::CatalogQuery;
pub use search::SearchTerm;
pub use sort::{SortCriterion, SortDirection, SortSpec};
