//! Catalog routes: listing, search, registration forms and deletes.

use crate::handlers::{
    add_author, add_author_form, add_book, add_book_form, author_detail, delete_author_books, delete_book, home,
    search,
};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/search", get(search))
        .route("/add_author", get(add_author_form).post(add_author))
        .route("/add_book", get(add_book_form).post(add_book))
        .route("/author/:author_id", get(author_detail))
        .route("/author/:author_id/delete", post(delete_author_books).delete(delete_author_books))
        .route("/book/:book_id/delete", post(delete_book).delete(delete_book))
        .with_state(state)
}
