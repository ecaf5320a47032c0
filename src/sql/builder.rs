//! Builds the catalog SELECT from a typed sort spec. Only fixed identifiers reach the SQL text.

use crate::query::{SortCriterion, SortDirection, SortSpec};

/// Books joined with their author's name. LEFT JOIN so an orphan row still lists.
const CATALOG_SELECT: &str = "SELECT b.book_id, b.isbn, b.title, b.publication_year, b.author_id, a.name AS author_name \
     FROM books b LEFT JOIN authors a ON a.author_id = b.author_id";

fn order_column(criterion: SortCriterion) -> &'static str {
    match criterion {
        SortCriterion::Title => "b.title",
        SortCriterion::Author => "a.name",
        SortCriterion::Year => "b.publication_year",
    }
}

fn direction_keyword(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    }
}

/// ORDER BY clause. Ties always break on `book_id ASC` so equal keys keep insertion order.
pub fn order_by_clause(sort: Option<SortSpec>) -> String {
    match sort {
        None => "ORDER BY b.book_id ASC".to_string(),
        Some(spec) => format!(
            "ORDER BY {} {}, b.book_id ASC",
            order_column(spec.criterion),
            direction_keyword(spec.direction)
        ),
    }
}

/// Full catalog listing query.
pub fn select_catalog(sort: Option<SortSpec>) -> String {
    format!("{} {}", CATALOG_SELECT, order_by_clause(sort))
}
