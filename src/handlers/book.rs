//! Book registration and deletion.

use crate::error::AppError;
use crate::response::{success_one_created, success_one_message, success_one_ok};
use crate::service::validation::parse_id;
use crate::service::BookForm;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Form;

/// GET /add_book — form fields plus the authors a book can be filed under.
pub async fn add_book_form(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let authors = state.store.list_authors().await?;
    Ok(success_one_ok(serde_json::json!({
        "fields": ["title", "isbn", "publication_year", "author"],
        "required": ["title", "isbn", "publication_year", "author"],
        "authors": authors,
    })))
}

/// POST /add_book — form-urlencoded `title`, `isbn`, `publication_year`, `author` (author id).
pub async fn add_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let book = state.service().register_book(&form).await?;
    let message = format!("Book {} added to database.", book.title);
    Ok(success_one_created(book, message))
}

/// POST|DELETE /book/:book_id/delete
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let book_id = parse_id("book", &book_id)?;
    let book = state.service().delete_book(book_id).await?;
    let message = format!("Book {} deleted.", book.title);
    Ok(success_one_message(book, message))
}
