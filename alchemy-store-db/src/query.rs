// SPDX-FileCopyrightText: 2025 Book Alchemy contributors
// SPDX-License-Identifier: MIT

//! Read query operations for the catalog database.

use rusqlite::{OptionalExtension, Row, params};

use crate::connection::CatalogDb;
use crate::error::Result;
use crate::types::{Author, Book, BookListing, SortKey, like_pattern};

pub(crate) fn author_from_row(row: &Row<'_>) -> rusqlite::Result<Author> {
    Ok(Author {
        id: row.get(0)?,
        name: row.get(1)?,
        birth_date: row.get(2)?,
        date_of_death: row.get(3)?,
    })
}

pub(crate) fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        isbn: row.get(1)?,
        title: row.get(2)?,
        publication_year: row.get(3)?,
        author_id: row.get(4)?,
    })
}

impl CatalogDb {
    /// List books joined with their authors.
    ///
    /// A blank `search` matches everything. Otherwise a book matches when its
    /// title, its author's name or its ISBN contains `search`, ignoring ASCII
    /// case. The whole result set is returned.
    pub fn list_books(&self, search: Option<&str>, sort: SortKey) -> Result<Vec<BookListing>> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let sql = format!(
            r#"
            SELECT b.id, b.isbn, b.title, b.publication_year, b.author_id, a.name
            FROM books b
            JOIN authors a ON a.id = b.author_id
            WHERE ?1 IS NULL
               OR b.title LIKE ?1 ESCAPE '\'
               OR a.name LIKE ?1 ESCAPE '\'
               OR b.isbn LIKE ?1 ESCAPE '\'
            ORDER BY {}
            "#,
            sort.order_by()
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;

        let rows = stmt.query_map(params![pattern], |row| {
            Ok(BookListing {
                id: row.get(0)?,
                isbn: row.get(1)?,
                title: row.get(2)?,
                publication_year: row.get(3)?,
                author_id: row.get(4)?,
                author_name: row.get(5)?,
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// All authors ordered by name.
    pub fn list_authors(&self) -> Result<Vec<Author>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT id, name, birth_date, date_of_death
            FROM authors
            ORDER BY name ASC, id ASC
            "#,
        )?;

        let rows = stmt.query_map([], author_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Query an author by database ID.
    pub fn query_author(&self, id: i64) -> Result<Option<Author>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, name, birth_date, date_of_death FROM authors WHERE id = ?1",
        )?;
        Ok(stmt.query_row(params![id], author_from_row).optional()?)
    }

    /// Query an author by exact name.
    pub fn query_author_by_name(&self, name: &str) -> Result<Option<Author>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, name, birth_date, date_of_death FROM authors WHERE name = ?1",
        )?;
        Ok(stmt.query_row(params![name], author_from_row).optional()?)
    }

    /// Query a book by database ID.
    pub fn query_book(&self, id: i64) -> Result<Option<Book>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, isbn, title, publication_year, author_id FROM books WHERE id = ?1",
        )?;
        Ok(stmt.query_row(params![id], book_from_row).optional()?)
    }

    /// Query a book by exact ISBN.
    pub fn query_book_by_isbn(&self, isbn: &str) -> Result<Option<Book>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, isbn, title, publication_year, author_id FROM books WHERE isbn = ?1",
        )?;
        Ok(stmt.query_row(params![isbn], book_from_row).optional()?)
    }

    /// Books written by an author, ordered by title.
    pub fn query_books_by_author(&self, author_id: i64) -> Result<Vec<Book>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT id, isbn, title, publication_year, author_id
            FROM books
            WHERE author_id = ?1
            ORDER BY title ASC, id ASC
            "#,
        )?;
        let rows = stmt.query_map(params![author_id], book_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Count all authors.
    pub fn count_authors(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM authors", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Count all books.
    pub fn count_books(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
