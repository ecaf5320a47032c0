//! Google Books volumes API as a cover source.

use super::{normalize_isbn, CoverError, CoverLookup};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    #[serde(default)]
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageLinks {
    thumbnail: Option<String>,
    small_thumbnail: Option<String>,
}

impl VolumesResponse {
    fn first_cover(self) -> Option<String> {
        self.items
            .into_iter()
            .next()
            .and_then(|v| v.volume_info)
            .and_then(|info| info.image_links)
            .and_then(|links| links.thumbnail.or(links.small_thumbnail))
            .filter(|url| !url.is_empty())
    }
}

pub struct GoogleBooksCovers {
    client: Client,
    base_url: String,
}

impl GoogleBooksCovers {
    /// `base_url` is the API root, e.g. `https://www.googleapis.com/books/v1`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CoverError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoverError::Request(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn volumes_url(&self) -> String {
        format!("{}/volumes", self.base_url)
    }
}

#[async_trait]
impl CoverLookup for GoogleBooksCovers {
    async fn lookup(&self, isbn: &str) -> Result<Option<String>, CoverError> {
        let isbn = normalize_isbn(isbn);
        if isbn.is_empty() {
            return Ok(None);
        }
        let response = self
            .client
            .get(self.volumes_url())
            .query(&[("q", format!("isbn:{}", isbn))])
            .send()
            .await
            .map_err(|e| CoverError::Request(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let body: VolumesResponse = response
                    .json()
                    .await
                    .map_err(|e| CoverError::Decode(e.to_string()))?;
                let cover = body.first_cover();
                tracing::debug!(isbn = %isbn, found = cover.is_some(), "cover lookup");
                Ok(cover)
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(CoverError::Status(status.as_u16())),
        }
    }
}
