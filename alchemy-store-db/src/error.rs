// SPDX-FileCopyrightText: 2025 Book Alchemy contributors
// SPDX-License-Identifier: MIT

//! Error types for catalog database operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during catalog database operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to open database with context
    #[error("Failed to open database at '{path}': {source}")]
    DatabaseOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Database file not found
    #[error("Database not found at: {0}")]
    DatabaseNotFound(PathBuf),

    /// Schema version mismatch
    #[error("Schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch { expected: i32, found: i32 },

    /// An author with this name is already catalogued
    #[error("An author named '{0}' already exists")]
    DuplicateAuthor(String),

    /// A book with this ISBN is already catalogued
    #[error("A book with ISBN '{0}' already exists")]
    DuplicateIsbn(String),

    /// Referenced author does not exist
    #[error("Author not found: {0}")]
    AuthorNotFound(i64),

    /// Referenced book does not exist
    #[error("Book not found: {0}")]
    BookNotFound(i64),
}

impl Error {
    /// Whether the error is caused by the submitted data rather than the database.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::DuplicateAuthor(_)
                | Error::DuplicateIsbn(_)
                | Error::AuthorNotFound(_)
                | Error::BookNotFound(_)
        )
    }
}
