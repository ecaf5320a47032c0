//! Shared application state for all routes: store handle, cover lookup and policy flags.

use crate::config::AppConfig;
use crate::cover::{CachedCovers, CoverError, CoverLookup, GoogleBooksCovers, NoCovers};
use crate::query::CatalogQuery;
use crate::service::CatalogService;
use crate::store::CatalogStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: CatalogStore,
    pub covers: Arc<dyn CoverLookup>,
    pub reject_duplicate_author_names: bool,
}

impl AppState {
    pub fn new(store: CatalogStore, covers: Arc<dyn CoverLookup>, reject_duplicate_author_names: bool) -> Self {
        Self {
            store,
            covers,
            reject_duplicate_author_names,
        }
    }

    /// Build the cover lookup described by `config` and bundle it with `store`.
    pub fn from_config(store: CatalogStore, config: &AppConfig) -> Result<Self, CoverError> {
        let covers: Arc<dyn CoverLookup> = if config.cover.enabled {
            let google = GoogleBooksCovers::new(config.cover.base_url.clone(), config.cover.timeout)?;
            Arc::new(CachedCovers::from_config(google, &config.cover))
        } else {
            Arc::new(NoCovers)
        };
        Ok(Self::new(store, covers, config.reject_duplicate_author_names))
    }

    pub fn query(&self) -> CatalogQuery<'_> {
        CatalogQuery::new(&self.store, self.covers.as_ref())
    }

    pub fn service(&self) -> CatalogService<'_> {
        CatalogService::new(&self.store, self.reject_duplicate_author_names)
    }
}
