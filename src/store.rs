//! Catalog store: `authors` and `books` tables on SQLite, DDL and record access.

use crate::error::{AppError, ConfigError};
use crate::model::{Author, AuthorId, Book, BookId, CatalogRow, NewAuthor, NewBook};
use crate::query::SortSpec;
use crate::sql::select_catalog;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

const AUTHORS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS authors (
        author_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(100) NOT NULL,
        birth_date DATE NOT NULL,
        date_of_death DATE
    )
"#;

const BOOKS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS books (
        book_id INTEGER PRIMARY KEY AUTOINCREMENT,
        isbn VARCHAR(17) NOT NULL,
        title VARCHAR(200) NOT NULL,
        publication_year SMALLINT NOT NULL,
        author_id INTEGER NOT NULL REFERENCES authors (author_id)
    )
"#;

const BOOKS_AUTHOR_INDEX_DDL: &str = "CREATE INDEX IF NOT EXISTS idx_books_author_id ON books (author_id)";

/// Handle to the catalog database. Cheap to clone; lives from process start to stop.
#[derive(Clone, Debug)]
pub struct CatalogStore {
    pool: SqlitePool,
}

impl CatalogStore {
    /// Open (creating file and parent directory when missing) and ensure tables exist.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        ensure_database_dir(database_url)?;
        let opts = SqliteConnectOptions::from_str(database_url)
            .map_err(|_| ConfigError::Invalid {
                key: "DATABASE_URL",
                value: database_url.to_string(),
            })?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().max_connections(5).connect_with(opts).await?;
        let store = Self { pool };
        store.ensure_tables().await?;
        Ok(store)
    }

    /// Private in-memory database on a single long-lived connection.
    pub async fn open_in_memory() -> Result<Self, AppError> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?;
        let store = Self { pool };
        store.ensure_tables().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create `authors` and `books` if they do not exist. Idempotent.
    pub async fn ensure_tables(&self) -> Result<(), AppError> {
        for ddl in [AUTHORS_DDL, BOOKS_DDL, BOOKS_AUTHOR_INDEX_DDL] {
            sqlx::query(ddl).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    pub async fn create_author(&self, new: &NewAuthor) -> Result<Author, AppError> {
        tracing::debug!(name = %new.name, "insert author");
        let author = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (name, birth_date, date_of_death) VALUES (?, ?, ?) \
             RETURNING author_id, name, birth_date, date_of_death",
        )
        .bind(&new.name)
        .bind(new.birth_date)
        .bind(new.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(author)
    }

    /// Insert a book. Fails with `Reference` when `author_id` names no author; nothing is written then.
    pub async fn create_book(&self, new: &NewBook) -> Result<Book, AppError> {
        if self.get_author(new.author_id).await?.is_none() {
            return Err(AppError::Reference(format!("author {} does not exist", new.author_id)));
        }
        tracing::debug!(title = %new.title, author_id = new.author_id, "insert book");
        let result = sqlx::query_as::<_, Book>(
            "INSERT INTO books (isbn, title, publication_year, author_id) VALUES (?, ?, ?, ?) \
             RETURNING book_id, isbn, title, publication_year, author_id",
        )
        .bind(&new.isbn)
        .bind(&new.title)
        .bind(new.publication_year)
        .bind(new.author_id)
        .fetch_one(&self.pool)
        .await;
        match result {
            Ok(book) => Ok(book),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                Err(AppError::Reference(format!("author {} does not exist", new.author_id)))
            }
            Err(e) => Err(AppError::Db(e)),
        }
    }

    pub async fn get_author(&self, author_id: AuthorId) -> Result<Option<Author>, AppError> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT author_id, name, birth_date, date_of_death FROM authors WHERE author_id = ?",
        )
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(author)
    }

    pub async fn get_book(&self, book_id: BookId) -> Result<Option<Book>, AppError> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT book_id, isbn, title, publication_year, author_id FROM books WHERE book_id = ?",
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    /// All authors, ordered by name (for choosing one on the book form).
    pub async fn list_authors(&self) -> Result<Vec<Author>, AppError> {
        let rows = sqlx::query_as::<_, Author>(
            "SELECT author_id, name, birth_date, date_of_death FROM authors ORDER BY name ASC, author_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn author_name_exists(&self, name: &str) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM authors WHERE name = ?)")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn books_by_author(&self, author_id: AuthorId) -> Result<Vec<Book>, AppError> {
        let rows = sqlx::query_as::<_, Book>(
            "SELECT book_id, isbn, title, publication_year, author_id FROM books \
             WHERE author_id = ? ORDER BY book_id ASC",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Books joined with author names, ordered by `sort` (insertion order when `None`).
    pub async fn list_catalog(&self, sort: Option<SortSpec>) -> Result<Vec<CatalogRow>, AppError> {
        let sql = select_catalog(sort);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, CatalogRow>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Delete one book; returns it. `NotFound` when no such book.
    pub async fn delete_book(&self, book_id: BookId) -> Result<Book, AppError> {
        let deleted = sqlx::query_as::<_, Book>(
            "DELETE FROM books WHERE book_id = ? RETURNING book_id, isbn, title, publication_year, author_id",
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;
        deleted.ok_or_else(|| AppError::NotFound(format!("book {}", book_id)))
    }

    /// Delete every book of an author, keeping the author row. Returns the author and the count removed.
    pub async fn delete_books_by_author(&self, author_id: AuthorId) -> Result<(Author, u64), AppError> {
        let author = self
            .get_author(author_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("author {}", author_id)))?;
        let result = sqlx::query("DELETE FROM books WHERE author_id = ?")
            .bind(author_id)
            .execute(&self.pool)
            .await?;
        Ok((author, result.rows_affected()))
    }
}

/// For file-backed URLs, create the parent directory of the database file.
fn ensure_database_dir(database_url: &str) -> Result<(), AppError> {
    let Some(path) = sqlite_file_path(database_url) else {
        return Ok(());
    };
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| ConfigError::Load(format!("cannot create {}: {}", parent.display(), e)))?;
    }
    Ok(())
}

fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or("");
    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(path)
    }
}
