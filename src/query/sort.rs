//! Sort criterion and direction parsed from listing query parameters.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCriterion {
    Title,
    Author,
    Year,
}

impl SortCriterion {
    /// Any value other than `title` or `author` orders by year.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "title" => SortCriterion::Title,
            "author" => SortCriterion::Author,
            "year" => SortCriterion::Year,
            other => {
                tracing::debug!(criterion = %other, "unrecognized sort criterion, ordering by year");
                SortCriterion::Year
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Only `desc` is descending; everything else, including absence, is ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|d| d.trim().to_ascii_lowercase()) {
            Some(d) if d == "desc" => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub criterion: SortCriterion,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(criterion: SortCriterion, direction: SortDirection) -> Self {
        Self { criterion, direction }
    }

    /// `None` when no criterion was given (insertion order).
    pub fn from_params(sort: Option<&str>, dir: Option<&str>) -> Option<Self> {
        let sort = sort.filter(|s| !s.trim().is_empty())?;
        Some(Self::new(SortCriterion::parse(sort), SortDirection::parse(dir)))
    }
}
