//! CatalogService: validated catalog mutations.

mod catalog;
pub mod validation;
pub use catalog::CatalogService;
pub use validation::{AuthorForm, BookForm, RequestValidator};
