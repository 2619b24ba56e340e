// SPDX-FileCopyrightText: 2025 Book Alchemy contributors
// SPDX-License-Identifier: MIT

//! Database schema definitions for the catalog.

/// Catalog schema SQL (authors, books)
pub const SCHEMA_SQL: &str = r#"
create table if not exists authors (
    id            integer primary key autoincrement not null,
    name          text unique not null check (length(name) > 0),
    birth_date    text,
    date_of_death text
);

create table if not exists books (
    id               integer primary key autoincrement not null,
    isbn             text unique not null check (length(isbn) > 0),
    title            text not null check (length(title) > 0),
    publication_year integer,
    author_id        integer not null,
    foreign key (author_id) references authors(id) on delete cascade
);

create index if not exists IndexBooksAuthor on books(author_id);
create index if not exists IndexBooksTitle on books(title);
"#;

/// Schema version, stored in `PRAGMA user_version`
pub const SCHEMA_VERSION: i32 = 1;
