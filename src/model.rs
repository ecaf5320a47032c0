//! Catalog entities and the display record handed to the presentation layer.

use chrono::NaiveDate;
use serde::Serialize;

pub type AuthorId = i64;
pub type BookId = i64;

/// Name shown when a book row has no resolvable author.
pub const UNKNOWN_AUTHOR: &str = "Unknown author";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Author {
    pub author_id: AuthorId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub date_of_death: Option<NaiveDate>,
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, born {}", self.name, self.birth_date)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Book {
    pub book_id: BookId,
    pub isbn: String,
    pub title: String,
    pub publication_year: i16,
    pub author_id: AuthorId,
}

/// Validated input for a new author.
#[derive(Clone, Debug)]
pub struct NewAuthor {
    pub name: String,
    pub birth_date: NaiveDate,
    pub date_of_death: Option<NaiveDate>,
}

/// Validated input for a new book.
#[derive(Clone, Debug)]
pub struct NewBook {
    pub title: String,
    pub isbn: String,
    pub publication_year: i16,
    pub author_id: AuthorId,
}

/// A book joined with its author's name. `author_name` is `None` only for orphan rows.
#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct CatalogRow {
    pub book_id: BookId,
    pub isbn: String,
    pub title: String,
    pub publication_year: i16,
    pub author_id: AuthorId,
    pub author_name: Option<String>,
}

/// Presentation-ready book: title, author name and cover URL (empty when unknown).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub book_id: BookId,
    pub author_id: AuthorId,
    pub title: String,
    pub author_name: String,
    pub cover_url: String,
    pub isbn: String,
    pub publication_year: i16,
}

/// An author together with the books that reference it.
#[derive(Clone, Debug, Serialize)]
pub struct AuthorWithBooks {
    #[serde(flatten)]
    pub author: Author,
    pub books: Vec<Book>,
}
