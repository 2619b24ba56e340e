// SPDX-FileCopyrightText: 2025 Book Alchemy contributors
// SPDX-License-Identifier: MIT

//! Write operations for the catalog database.
//!
//! Every operation runs in its own transaction. Uniqueness and author
//! existence are checked inside that transaction before writing, and the
//! schema constraints backstop the checks.

use chrono::NaiveDate;
use rusqlite::{ErrorCode, OptionalExtension, TransactionBehavior, ffi, params};
use tracing::debug;

use crate::connection::CatalogDb;
use crate::error::{Error, Result};
use crate::query::{author_from_row, book_from_row};
use crate::types::{AuthorRemoval, BookRemoval};

/// Parameters for adding a new author.
#[derive(Debug, Clone, Default)]
pub struct NewAuthor {
    /// Unique name, already trimmed
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Parameters for adding a new book.
#[derive(Debug, Clone, Default)]
pub struct NewBook {
    /// Unique ISBN, already trimmed
    pub isbn: String,
    pub title: String,
    pub publication_year: Option<i32>,
    /// Must reference an existing author
    pub author_id: i64,
}

/// Extended result code of a failed constraint, if that is what `err` is.
fn constraint_violation(err: &rusqlite::Error) -> Option<i32> {
    match err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            Some(e.extended_code)
        }
        _ => None,
    }
}

impl CatalogDb {
    /// Add a new author.
    ///
    /// Returns the database ID of the new author, or
    /// [`Error::DuplicateAuthor`] if the name is taken.
    pub fn insert_author(&mut self, author: &NewAuthor) -> Result<i64> {
        let tx = self.conn.transaction()?;

        let taken = tx
            .query_row(
                "SELECT 1 FROM authors WHERE name = ?1",
                params![author.name],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if taken {
            return Err(Error::DuplicateAuthor(author.name.clone()));
        }

        tx.execute(
            r#"
            INSERT INTO authors (name, birth_date, date_of_death)
            VALUES (?1, ?2, ?3)
            "#,
            params![author.name, author.birth_date, author.date_of_death],
        )
        .map_err(|e| match constraint_violation(&e) {
            Some(ffi::SQLITE_CONSTRAINT_UNIQUE) => Error::DuplicateAuthor(author.name.clone()),
            _ => Error::from(e),
        })?;

        let id = tx.last_insert_rowid();
        tx.commit()?;
        debug!("Inserted author {id} ({})", author.name);
        Ok(id)
    }

    /// Add a new book.
    ///
    /// Returns the database ID of the new book. Fails with
    /// [`Error::DuplicateIsbn`] if the ISBN is taken and with
    /// [`Error::AuthorNotFound`] if the author does not exist.
    pub fn insert_book(&mut self, book: &NewBook) -> Result<i64> {
        let tx = self.conn.transaction()?;

        let taken = tx
            .query_row(
                "SELECT 1 FROM books WHERE isbn = ?1",
                params![book.isbn],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if taken {
            return Err(Error::DuplicateIsbn(book.isbn.clone()));
        }

        let author_exists = tx
            .query_row(
                "SELECT 1 FROM authors WHERE id = ?1",
                params![book.author_id],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if !author_exists {
            return Err(Error::AuthorNotFound(book.author_id));
        }

        tx.execute(
            r#"
            INSERT INTO books (isbn, title, publication_year, author_id)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![book.isbn, book.title, book.publication_year, book.author_id],
        )
        .map_err(|e| match constraint_violation(&e) {
            Some(ffi::SQLITE_CONSTRAINT_UNIQUE) => Error::DuplicateIsbn(book.isbn.clone()),
            Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => Error::AuthorNotFound(book.author_id),
            _ => Error::from(e),
        })?;

        let id = tx.last_insert_rowid();
        tx.commit()?;
        debug!("Inserted book {id} ({})", book.isbn);
        Ok(id)
    }

    /// Delete a book, and its author if no other books remain.
    ///
    /// Both deletions and the remaining-book count happen in one immediate
    /// transaction, so concurrent deletions of an author's last books cannot
    /// interleave. Fails with [`Error::BookNotFound`] without changing
    /// anything if the book does not exist.
    pub fn delete_book(&mut self, id: i64) -> Result<BookRemoval> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let book = tx
            .query_row(
                "SELECT id, isbn, title, publication_year, author_id FROM books WHERE id = ?1",
                params![id],
                book_from_row,
            )
            .optional()?
            .ok_or(Error::BookNotFound(id))?;

        tx.execute("DELETE FROM books WHERE id = ?1", params![id])?;

        let remaining: i64 = tx.query_row(
            "SELECT COUNT(*) FROM books WHERE author_id = ?1",
            params![book.author_id],
            |row| row.get(0),
        )?;

        let removed_author = if remaining == 0 {
            let author = tx
                .query_row(
                    "SELECT id, name, birth_date, date_of_death FROM authors WHERE id = ?1",
                    params![book.author_id],
                    author_from_row,
                )
                .optional()?;
            tx.execute(
                "DELETE FROM authors WHERE id = ?1",
                params![book.author_id],
            )?;
            author
        } else {
            None
        };

        tx.commit()?;
        debug!(
            "Deleted book {id}, author {} {}",
            book.author_id,
            if removed_author.is_some() {
                "removed"
            } else {
                "kept"
            }
        );
        Ok(BookRemoval {
            book,
            removed_author,
        })
    }

    /// Delete an author together with all of their books.
    ///
    /// The books go through the `on delete cascade` foreign key.
    pub fn delete_author(&mut self, id: i64) -> Result<AuthorRemoval> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let author = tx
            .query_row(
                "SELECT id, name, birth_date, date_of_death FROM authors WHERE id = ?1",
                params![id],
                author_from_row,
            )
            .optional()?
            .ok_or(Error::AuthorNotFound(id))?;

        let books: i64 = tx.query_row(
            "SELECT COUNT(*) FROM books WHERE author_id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        tx.execute("DELETE FROM authors WHERE id = ?1", params![id])?;
        tx.commit()?;
        debug!("Deleted author {id} and {books} book(s)");

        Ok(AuthorRemoval {
            author,
            books_removed: books as u64,
        })
    }
}
