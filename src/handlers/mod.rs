//! HTTP handlers for the catalog, authors and books.

pub mod author;
pub mod book;
pub mod catalog;
pub use author::*;
pub use book::*;
pub use catalog::*;

use crate::error::ErrorBody;
use axum::http::{StatusCode, Uri};
use axum::Json;

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: crate::error::ErrorDetail {
                code: "not_found".to_string(),
                message: format!("Error 404: {} Not Found", uri.path()),
            },
        }),
    )
}
