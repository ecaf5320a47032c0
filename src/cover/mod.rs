//! Cover image lookup by ISBN: the lookup seam, an HTTP implementation and a cache in front of it.

mod cached;
mod google;

pub use cached::CachedCovers;
pub use google::GoogleBooksCovers;

use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoverError {
    #[error("cover request failed: {0}")]
    Request(String),
    #[error("cover service returned status {0}")]
    Status(u16),
    #[error("cover response unreadable: {0}")]
    Decode(String),
    #[error("cover service unavailable (circuit open)")]
    CircuitOpen,
}

/// Resolves an ISBN to a cover image URL. `Ok(None)` means the service knows no cover.
#[async_trait]
pub trait CoverLookup: Send + Sync {
    async fn lookup(&self, isbn: &str) -> Result<Option<String>, CoverError>;
}

/// Lookup used when the cover service is disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCovers;

#[async_trait]
impl CoverLookup for NoCovers {
    async fn lookup(&self, _isbn: &str) -> Result<Option<String>, CoverError> {
        Ok(None)
    }
}

/// Cover URL for display: failures and unknown covers become the empty string.
pub async fn cover_url_or_empty(covers: &dyn CoverLookup, isbn: &str) -> String {
    match covers.lookup(isbn).await {
        Ok(Some(url)) => url,
        Ok(None) => String::new(),
        Err(e) => {
            tracing::warn!(isbn = %isbn, error = %e, "cover lookup failed");
            String::new()
        }
    }
}

fn isbn_separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s\-]+").expect("ISBN separator pattern is valid"))
}

/// Strip whitespace and hyphens so "978-0-14-143958-7" and "9780141439587" share a key.
pub fn normalize_isbn(isbn: &str) -> String {
    isbn_separators().replace_all(isbn.trim(), "").into_owned()
}
