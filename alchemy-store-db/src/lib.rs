// SPDX-FileCopyrightText: 2025 Book Alchemy contributors
// SPDX-License-Identifier: MIT

//! SQLite catalog of authors and books.
//!
//! This crate owns the relational side of Book Alchemy: the `authors` and
//! `books` tables, the listing query with search and ordering, and the
//! write operations that keep the catalog consistent.
//!
//! # Key Features
//!
//! - Unique author names and ISBNs, checked before insert and enforced by the schema
//! - Listing with case-insensitive substring search over title, author and ISBN
//! - Deleting a book removes its author in the same transaction once no books remain
//! - In-memory database for testing
//!
//! # Example
//!
//! ```ignore
//! use alchemy_store_db::{CatalogDb, OpenMode, SortKey};
//!
//! let db = CatalogDb::open("data/library.sqlite", OpenMode::Create)?;
//! db.create_schema()?;
//!
//! for book in db.list_books(Some("tolkien"), SortKey::Year)? {
//!     println!("{} ({})", book.title, book.author_name);
//! }
//! ```

mod connection;
mod error;
mod query;
mod schema;
mod types;
mod write;

pub use connection::{CatalogDb, OpenMode};
pub use error::{Error, Result};
pub use schema::SCHEMA_VERSION;
pub use types::*;
pub use write::*;
