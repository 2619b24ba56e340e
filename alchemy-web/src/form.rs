//! Submitted form fields and their validation into catalog writes.

use alchemy_store_db::{NewAuthor, NewBook};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AuthorForm {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) birth_date: String,
    #[serde(default)]
    pub(crate) date_of_death: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BookForm {
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) isbn: String,
    #[serde(default)]
    pub(crate) publication_year: String,
    #[serde(default)]
    pub(crate) author_id: String,
}

fn optional_date(field: &'static str, value: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

impl AuthorForm {
    pub(crate) fn validate(&self) -> Result<NewAuthor, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingAuthorName);
        }
        Ok(NewAuthor {
            name: name.to_string(),
            birth_date: optional_date("birth date", &self.birth_date)?,
            date_of_death: optional_date("date of death", &self.date_of_death)?,
        })
    }
}

impl BookForm {
    pub(crate) fn validate(&self) -> Result<NewBook, ValidationError> {
        let title = self.title.trim();
        let isbn = self.isbn.trim();
        let author_id = self.author_id.trim();
        if title.is_empty() || isbn.is_empty() || author_id.is_empty() {
            return Err(ValidationError::MissingBookFields);
        }

        let author_id = author_id
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidAuthorId(author_id.to_string()))?;

        let year = self.publication_year.trim();
        let publication_year = if year.is_empty() {
            None
        } else {
            Some(
                year.parse::<i32>()
                    .map_err(|_| ValidationError::InvalidYear(year.to_string()))?,
            )
        };

        Ok(NewBook {
            isbn: isbn.to_string(),
            title: title.to_string(),
            publication_year,
            author_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn author_form(name: &str, birth: &str, death: &str) -> AuthorForm {
        AuthorForm {
            name: name.into(),
            birth_date: birth.into(),
            date_of_death: death.into(),
        }
    }

    fn book_form(title: &str, isbn: &str, year: &str, author: &str) -> BookForm {
        BookForm {
            title: title.into(),
            isbn: isbn.into(),
            publication_year: year.into(),
            author_id: author.into(),
        }
    }

    #[test]
    fn test_author_trimmed_with_dates() {
        let author = author_form("  Mary Shelley ", "1797-08-30", " 1851-02-01 ")
            .validate()
            .unwrap();
        assert_eq!(author.name, "Mary Shelley");
        assert_eq!(author.birth_date, NaiveDate::from_ymd_opt(1797, 8, 30));
        assert_eq!(author.date_of_death, NaiveDate::from_ymd_opt(1851, 2, 1));
    }

    #[test]
    fn test_author_dates_optional() {
        let author = author_form("Homer", "", "  ").validate().unwrap();
        assert_eq!(author.birth_date, None);
        assert_eq!(author.date_of_death, None);
    }

    #[rstest]
    #[case::empty("", "", "", ValidationError::MissingAuthorName)]
    #[case::blank("   ", "1900-01-01", "", ValidationError::MissingAuthorName)]
    #[case::bad_birth("X", "01/02/1900", "", ValidationError::InvalidDate { field: "birth date", value: "01/02/1900".into() })]
    #[case::impossible_birth("X", "1900-02-30", "", ValidationError::InvalidDate { field: "birth date", value: "1900-02-30".into() })]
    #[case::bad_death("X", "", "yesterday", ValidationError::InvalidDate { field: "date of death", value: "yesterday".into() })]
    fn test_author_rejected(
        #[case] name: &str,
        #[case] birth: &str,
        #[case] death: &str,
        #[case] expected: ValidationError,
    ) {
        assert_eq!(
            author_form(name, birth, death).validate().unwrap_err(),
            expected
        );
    }

    #[test]
    fn test_book_valid() {
        let book = book_form(" Dune ", " 9780441013593", "1965", " 3 ")
            .validate()
            .unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.isbn, "9780441013593");
        assert_eq!(book.publication_year, Some(1965));
        assert_eq!(book.author_id, 3);
    }

    #[test]
    fn test_book_year_optional() {
        let book = book_form("Dune", "1", "", "3").validate().unwrap();
        assert_eq!(book.publication_year, None);
    }

    #[rstest]
    #[case::no_title("", "1", "", "1", ValidationError::MissingBookFields)]
    #[case::no_isbn("T", " ", "", "1", ValidationError::MissingBookFields)]
    #[case::no_author("T", "1", "", "", ValidationError::MissingBookFields)]
    #[case::author_not_numeric("T", "1", "", "abc", ValidationError::InvalidAuthorId("abc".into()))]
    #[case::year_not_numeric("T", "1", "MCMLXV", "1", ValidationError::InvalidYear("MCMLXV".into()))]
    #[case::year_fraction("T", "1", "1965.5", "1", ValidationError::InvalidYear("1965.5".into()))]
    fn test_book_rejected(
        #[case] title: &str,
        #[case] isbn: &str,
        #[case] year: &str,
        #[case] author: &str,
        #[case] expected: ValidationError,
    ) {
        assert_eq!(
            book_form(title, isbn, year, author).validate().unwrap_err(),
            expected
        );
    }
}
