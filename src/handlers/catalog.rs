//! Catalog listing and search handlers.

use crate::error::AppError;
use crate::query::{SearchTerm, SortSpec};
use crate::response::{success_many, success_many_with_message};
use crate::state::AppState;
use axum::extract::{Query, State};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub sort: Option<String>,
    pub dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// GET / — all books as display records, optionally sorted by `sort` and `dir`.
pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let sort = SortSpec::from_params(params.sort.as_deref(), params.dir.as_deref());
    let records = state.query().list(sort).await?;
    Ok(success_many(records))
}

/// GET /search?search= — matching books; an empty result carries a "no matches" message.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let term = SearchTerm::parse(params.search.as_deref())?;
    let records = state.query().search(&term).await?;
    let message = records
        .is_empty()
        .then(|| format!("No books match '{}'", term.as_str()));
    Ok(success_many_with_message(records, message))
}
