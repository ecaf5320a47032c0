//! Catalog listing, search and enrichment into display records.

use crate::cover::{cover_url_or_empty, CoverLookup};
use crate::error::AppError;
use crate::model::{CatalogRow, DisplayRecord, UNKNOWN_AUTHOR};
use crate::query::search::{filter_rows, SearchTerm};
use crate::query::SortSpec;
use crate::store::CatalogStore;

/// Read side of the catalog. Borrows the store handle and cover lookup for one request.
pub struct CatalogQuery<'a> {
    store: &'a CatalogStore,
    covers: &'a dyn CoverLookup,
}

impl<'a> CatalogQuery<'a> {
    pub fn new(store: &'a CatalogStore, covers: &'a dyn CoverLookup) -> Self {
        Self { store, covers }
    }

    /// Every book, ordered by `sort` (insertion order when `None`), enriched.
    pub async fn list(&self, sort: Option<SortSpec>) -> Result<Vec<DisplayRecord>, AppError> {
        let rows = self.store.list_catalog(sort).await?;
        Ok(self.enrich(rows).await)
    }

    /// Books whose title, year or author name contains `term`, in insertion order.
    /// No match is an empty vec.
    pub async fn search(&self, term: &SearchTerm) -> Result<Vec<DisplayRecord>, AppError> {
        let rows = self.store.list_catalog(None).await?;
        let matched = filter_rows(rows, term);
        tracing::debug!(term = %term.as_str(), matches = matched.len(), "catalog search");
        Ok(self.enrich(matched).await)
    }

    /// Attach author display name and cover URL to each row, keeping order.
    pub async fn enrich(&self, rows: Vec<CatalogRow>) -> Vec<DisplayRecord> {
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let cover_url = cover_url_or_empty(self.covers, &row.isbn).await;
            let author_name = match row.author_name {
                Some(name) => name,
                None => {
                    tracing::warn!(book_id = row.book_id, author_id = row.author_id, "book references missing author");
                    UNKNOWN_AUTHOR.to_string()
                }
            };
            out.push(DisplayRecord {
                book_id: row.book_id,
                author_id: row.author_id,
                title: row.title,
                author_name,
                cover_url,
                isbn: row.isbn,
                publication_year: row.publication_year,
            });
        }
        out
    }
}
