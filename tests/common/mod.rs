#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use library_catalog::model::{Author, Book, NewAuthor, NewBook};
use library_catalog::{CatalogStore, CoverError, CoverLookup};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Answers from a fixed table; unknown ISBNs have no cover.
#[derive(Default)]
pub struct FixedCovers {
    pub urls: HashMap<String, String>,
    pub calls: AtomicUsize,
}

impl FixedCovers {
    pub fn with(pairs: &[(&str, &str)]) -> Self {
        Self {
            urls: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CoverLookup for FixedCovers {
    async fn lookup(&self, isbn: &str) -> Result<Option<String>, CoverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.urls.get(isbn).cloned())
    }
}

/// Simulates an unreachable cover service.
pub struct DownCovers;

#[async_trait]
impl CoverLookup for DownCovers {
    async fn lookup(&self, _isbn: &str) -> Result<Option<String>, CoverError> {
        Err(CoverError::Request("connection refused".into()))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn store() -> CatalogStore {
    CatalogStore::open_in_memory().await.unwrap()
}

pub async fn author(store: &CatalogStore, name: &str, birth: NaiveDate) -> Author {
    store
        .create_author(&NewAuthor {
            name: name.to_string(),
            birth_date: birth,
            date_of_death: None,
        })
        .await
        .unwrap()
}

pub async fn book(store: &CatalogStore, title: &str, isbn: &str, year: i16, author_id: i64) -> Book {
    store
        .create_book(&NewBook {
            title: title.to_string(),
            isbn: isbn.to_string(),
            publication_year: year,
            author_id,
        })
        .await
        .unwrap()
}
