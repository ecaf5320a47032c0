//! Library catalog: authors and books on SQLite, sorted and searched listings enriched with cover images.

pub mod config;
pub mod cover;
pub mod error;
pub mod handlers;
pub mod model;
pub mod query;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use cover::{CachedCovers, CoverError, CoverLookup, GoogleBooksCovers, NoCovers};
pub use error::{AppError, ConfigError};
pub use model::{Author, Book, DisplayRecord, NewAuthor, NewBook};
pub use query::{CatalogQuery, SearchTerm, SortCriterion, SortDirection, SortSpec};
pub use routes::{app_router, catalog_routes, common_routes};
pub use service::CatalogService;
pub use state::AppState;
pub use store::CatalogStore;
