//! Catalog mutations: registration with validation and the duplicate-name policy, and deletes.

use crate::error::AppError;
use crate::model::{Author, AuthorId, Book, BookId};
use crate::service::validation::{AuthorForm, BookForm, RequestValidator};
use crate::store::CatalogStore;

/// Write side of the catalog.
pub struct CatalogService<'a> {
    store: &'a CatalogStore,
    reject_duplicate_author_names: bool,
}

impl<'a> CatalogService<'a> {
    pub fn new(store: &'a CatalogStore, reject_duplicate_author_names: bool) -> Self {
        Self {
            store,
            reject_duplicate_author_names,
        }
    }

    pub async fn register_author(&self, form: &AuthorForm) -> Result<Author, AppError> {
        let new = RequestValidator::author(form)?;
        if self.reject_duplicate_author_names && self.store.author_name_exists(&new.name).await? {
            return Err(AppError::Conflict(format!("author '{}' already exists", new.name)));
        }
        let author = self.store.create_author(&new).await?;
        tracing::info!(author_id = author.author_id, name = %author.name, "author added");
        Ok(author)
    }

    pub async fn register_book(&self, form: &BookForm) -> Result<Book, AppError> {
        let new = RequestValidator::book(form)?;
        let book = self.store.create_book(&new).await?;
        tracing::info!(book_id = book.book_id, title = %book.title, author_id = book.author_id, "book added");
        Ok(book)
    }

    pub async fn delete_book(&self, book_id: BookId) -> Result<Book, AppError> {
        let book = self.store.delete_book(book_id).await?;
        tracing::info!(book_id, title = %book.title, "book deleted");
        Ok(book)
    }

    /// Remove all books of the author; the author row stays.
    pub async fn delete_author_books(&self, author_id: AuthorId) -> Result<(Author, u64), AppError> {
        let (author, deleted) = self.store.delete_books_by_author(author_id).await?;
        tracing::info!(author_id, name = %author.name, deleted, "author's books deleted");
        Ok((author, deleted))
    }
}
