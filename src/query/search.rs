//! Case-insensitive search over title, publication year and author name.

use crate::error::AppError;
use crate::model::CatalogRow;

/// A validated, non-blank search term, stored lowercased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    needle: String,
}

impl SearchTerm {
    /// Missing or blank terms are rejected.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        let raw = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::BadRequest("search term is required".into()))?;
        Ok(Self {
            raw: raw.to_string(),
            needle: raw.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, row: &CatalogRow) -> bool {
        row.title.to_lowercase().contains(&self.needle)
            || row.publication_year.to_string().contains(&self.needle)
            || row
                .author_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&self.needle))
    }
}

/// Rows matching `term`, in their incoming order.
pub fn filter_rows(rows: Vec<CatalogRow>, term: &SearchTerm) -> Vec<CatalogRow> {
    rows.into_iter().filter(|row| term.matches(row)).collect()
}
