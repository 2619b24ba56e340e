// SPDX-FileCopyrightText: 2025 Book Alchemy contributors
// SPDX-License-Identifier: MIT

//! Database row types for the catalog.

use std::fmt;

use chrono::NaiveDate;

/// An author row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Database row ID
    pub id: i64,
    /// Unique display name
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// A book row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Database row ID
    pub id: i64,
    /// Unique ISBN, stored as entered
    pub isbn: String,
    pub title: String,
    pub publication_year: Option<i32>,
    /// ID of the owning row in `authors`
    pub author_id: i64,
}

/// A book joined with its author, as shown on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookListing {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub publication_year: Option<i32>,
    pub author_id: i64,
    pub author_name: String,
}

/// Ordering of the book listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Title ascending
    #[default]
    Title,
    /// Author name ascending, then title
    Author,
    /// Publication year descending, then title
    Year,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Title, SortKey::Author, SortKey::Year];

    /// Parse a request parameter, falling back to [`SortKey::Title`] for
    /// missing or unknown values.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            Some("author") => SortKey::Author,
            Some("year") => SortKey::Year,
            _ => SortKey::Title,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Year => "year",
        }
    }

    pub(crate) fn order_by(&self) -> &'static str {
        match self {
            SortKey::Title => "b.title ASC, b.id ASC",
            SortKey::Author => "a.name ASC, b.title ASC, b.id ASC",
            SortKey::Year => "b.publication_year IS NULL, b.publication_year DESC, b.title ASC, b.id ASC",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of deleting a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRemoval {
    /// The deleted book
    pub book: Book,
    /// The author, if the deletion left them without books and they were removed too
    pub removed_author: Option<Author>,
}

/// Outcome of deleting an author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRemoval {
    pub author: Author,
    /// Number of books removed by the cascade
    pub books_removed: u64,
}

/// Escape `%`, `_` and `\` and wrap the needle for a `LIKE ... ESCAPE '\'` substring match.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::missing(None, SortKey::Title)]
    #[case::title(Some("title"), SortKey::Title)]
    #[case::author(Some("author"), SortKey::Author)]
    #[case::year(Some("year"), SortKey::Year)]
    #[case::padded(Some(" year "), SortKey::Year)]
    #[case::unknown(Some("isbn"), SortKey::Title)]
    #[case::wrong_case(Some("YEAR"), SortKey::Title)]
    fn test_sort_key_from_param(#[case] param: Option<&str>, #[case] expected: SortKey) {
        assert_eq!(SortKey::from_param(param), expected);
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("tolkien"), "%tolkien%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\"), "%c:\\\\%");
    }
}
