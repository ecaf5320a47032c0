//! Form validation: required fields, dates and numbers into typed inputs.

use crate::error::AppError;
use crate::model::{AuthorId, NewAuthor, NewBook};
use chrono::NaiveDate;
use serde::Deserialize;

/// Dates arrive from HTML date inputs as `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Author registration form fields, all optional until validated.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AuthorForm {
    pub name: Option<String>,
    pub birthdate: Option<String>,
    pub date_of_death: Option<String>,
}

/// Book registration form fields. `author` carries the selected author id.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BookForm {
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub publication_year: Option<String>,
    pub author: Option<String>,
}

pub struct RequestValidator;

impl RequestValidator {
    /// Name and birth date are required; date of death is optional.
    pub fn author(form: &AuthorForm) -> Result<NewAuthor, AppError> {
        let name = required("name", &form.name)?;
        let birth = required("birthdate", &form.birthdate)?;
        let birth_date = parse_date("birthdate", birth)?;
        let date_of_death = present(&form.date_of_death)
            .map(|d| parse_date("date_of_death", d))
            .transpose()?;
        Ok(NewAuthor {
            name: name.to_string(),
            birth_date,
            date_of_death,
        })
    }

    /// Every book field is required. Emptiness is checked before any parsing.
    pub fn book(form: &BookForm) -> Result<NewBook, AppError> {
        let title = required("title", &form.title)?;
        let isbn = required("isbn", &form.isbn)?;
        let year = required("publication_year", &form.publication_year)?;
        let author = required("author", &form.author)?;
        let publication_year = year
            .parse::<i16>()
            .map_err(|_| AppError::BadRequest(format!("publication_year must be a year, got '{}'", year)))?;
        let author_id = parse_id("author", author)?;
        Ok(NewBook {
            title: title.to_string(),
            isbn: isbn.to_string(),
            publication_year,
            author_id,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str, AppError> {
    present(value).ok_or_else(|| AppError::Validation(field.to_string()))
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| AppError::BadRequest(format!("{} must be a date (YYYY-MM-DD), got '{}'", field, raw)))
}

/// Parse a numeric id from a form field or path segment.
pub fn parse_id(field: &str, raw: &str) -> Result<AuthorId, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("invalid {} id '{}'", field, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn author_requires_name_and_birthdate() {
        let form = AuthorForm { name: s("Jane Austen"), birthdate: None, date_of_death: None };
        assert!(matches!(RequestValidator::author(&form), Err(AppError::Validation(f)) if f == "birthdate"));

        let form = AuthorForm { name: s("  "), birthdate: s("1775-12-16"), date_of_death: None };
        assert!(matches!(RequestValidator::author(&form), Err(AppError::Validation(f)) if f == "name"));
    }

    #[test]
    fn author_dates_parse_and_empty_death_is_absent() {
        let form = AuthorForm { name: s("Jane Austen"), birthdate: s("1775-12-16"), date_of_death: s("") };
        let author = RequestValidator::author(&form).unwrap();
        assert_eq!(author.birth_date, NaiveDate::from_ymd_opt(1775, 12, 16).unwrap());
        assert_eq!(author.date_of_death, None);

        let form = AuthorForm { name: s("Jane Austen"), birthdate: s("16/12/1775"), date_of_death: None };
        assert!(matches!(RequestValidator::author(&form), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn book_requires_every_field() {
        let full = BookForm {
            title: s("Emma"),
            isbn: s("9780141439587"),
            publication_year: s("1815"),
            author: s("1"),
        };
        let book = RequestValidator::book(&full).unwrap();
        assert_eq!(book.publication_year, 1815);
        assert_eq!(book.author_id, 1);

        let missing_isbn = BookForm { isbn: s(""), ..full.clone() };
        assert!(matches!(RequestValidator::book(&missing_isbn), Err(AppError::Validation(f)) if f == "isbn"));

        let missing_author = BookForm { author: None, ..full };
        assert!(matches!(RequestValidator::book(&missing_author), Err(AppError::Validation(f)) if f == "author"));
    }

    #[test]
    fn book_rejects_malformed_numbers() {
        let form = BookForm {
            title: s("Emma"),
            isbn: s("9780141439587"),
            publication_year: s("eighteen-fifteen"),
            author: s("1"),
        };
        assert!(matches!(RequestValidator::book(&form), Err(AppError::BadRequest(_))));

        let form = BookForm { publication_year: s("1815"), author: s("jane"), ..form };
        assert!(matches!(RequestValidator::book(&form), Err(AppError::BadRequest(_))));
    }
}
