//! Author registration, detail and book clearing.

use crate::error::AppError;
use crate::model::AuthorWithBooks;
use crate::response::{success_one_created, success_one_message, success_one_ok};
use crate::service::validation::parse_id;
use crate::service::AuthorForm;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Form;

/// GET /add_author — the fields the registration form posts.
pub async fn add_author_form() -> impl axum::response::IntoResponse {
    success_one_ok(serde_json::json!({
        "fields": ["name", "birthdate", "date_of_death"],
        "required": ["name", "birthdate"],
        "date_format": "YYYY-MM-DD",
    }))
}

/// POST /add_author — form-urlencoded `name`, `birthdate`, optional `date_of_death`.
pub async fn add_author(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let author = state.service().register_author(&form).await?;
    let message = format!("Author {} added to database.", author.name);
    Ok(success_one_created(author, message))
}

/// GET /author/:author_id — the author and its books.
pub async fn author_detail(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let author_id = parse_id("author", &author_id)?;
    let author = state
        .store
        .get_author(author_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("author {}", author_id)))?;
    let books = state.store.books_by_author(author_id).await?;
    Ok(success_one_ok(AuthorWithBooks { author, books }))
}

/// POST|DELETE /author/:author_id/delete — delete the author's books, keep the author.
pub async fn delete_author_books(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let author_id = parse_id("author", &author_id)?;
    let (author, deleted) = state.service().delete_author_books(author_id).await?;
    let message = format!("Deleted {} book(s) by {}.", deleted, author.name);
    Ok(success_one_message(
        serde_json::json!({ "author_id": author.author_id, "deleted": deleted }),
        message,
    ))
}
