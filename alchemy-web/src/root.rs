use std::collections::HashMap;

use actix_web::{HttpRequest, web};
use alchemy_store_db::{BookListing, SortKey};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::template::{BOOK_ROW_TEMPLATE, INDEX_TEMPLATE, escape, page_response, render};

/// Characters that may not appear raw in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    sort: Option<String>,
    search_query: Option<String>,
}

/// Cover image for an ISBN. Not checked against the cover service.
pub(crate) fn cover_url(base: &str, isbn: &str) -> String {
    format!(
        "{}/{}-M.jpg",
        base.trim_end_matches('/'),
        utf8_percent_encode(isbn, PATH_SEGMENT)
    )
}

fn sort_label(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Title => "Title",
        SortKey::Author => "Author",
        SortKey::Year => "Newest first",
    }
}

fn sort_options(selected: SortKey) -> String {
    SortKey::ALL
        .iter()
        .map(|&key| {
            format!(
                "<option value=\"{}\"{}>{}</option>",
                key.as_str(),
                if key == selected { " selected" } else { "" },
                sort_label(key)
            )
        })
        .collect()
}

fn book_row(book: &BookListing, cover_base: &str) -> String {
    let mut vars = HashMap::new();
    vars.insert("cover_url", escape(&cover_url(cover_base, &book.isbn)));
    vars.insert("title", escape(&book.title));
    vars.insert("author", escape(&book.author_name));
    vars.insert(
        "year",
        book.publication_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "year unknown".to_string()),
    );
    vars.insert("isbn", escape(&book.isbn));
    vars.insert("delete_url", format!("/book/{}/delete", book.id));
    render(BOOK_ROW_TEMPLATE, &vars)
}

fn summary(count: usize, search: Option<&str>) -> String {
    match (count, search) {
        (0, Some(q)) => format!("No books match \u{201c}{}\u{201d}.", escape(q)),
        (0, None) => "No books in the library yet.".to_string(),
        (1, Some(q)) => format!("1 book matches \u{201c}{}\u{201d}.", escape(q)),
        (n, Some(q)) => format!("{n} books match \u{201c}{}\u{201d}.", escape(q)),
        (1, None) => "1 book".to_string(),
        (n, None) => format!("{n} books"),
    }
}

pub(crate) async fn get(
    req: HttpRequest,
    params: web::Query<ListingParams>,
    catalog: web::Data<Catalog>,
    config: web::Data<Config>,
) -> crate::ServerResult {
    let params = params.into_inner();
    let sort = SortKey::from_param(params.sort.as_deref());
    let search = params
        .search_query
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let books = catalog.list_books(search.clone(), sort).await?;

    let rows: String = books
        .iter()
        .map(|b| book_row(b, &config.cover_url_base))
        .collect();

    let mut vars = HashMap::new();
    vars.insert("search_query", escape(search.as_deref().unwrap_or_default()));
    vars.insert("sort_options", sort_options(sort));
    vars.insert("summary", summary(books.len(), search.as_deref()));
    vars.insert("rows", rows);
    let content = render(INDEX_TEMPLATE, &vars);

    Ok(page_response(&req, "Book Alchemy", &content))
}
