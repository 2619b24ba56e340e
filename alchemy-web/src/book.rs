use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, http, web};
use alchemy_store_db::Error as DbError;
use tracing::{error, info, warn};

use crate::catalog::Catalog;
use crate::flash::{self, Flashes, Level};
use crate::form::BookForm;
use crate::template::{ADD_BOOK_TEMPLATE, escape, page_response, render, render_page};

pub(crate) async fn get_add(
    req: HttpRequest,
    catalog: web::Data<Catalog>,
) -> crate::ServerResult {
    let authors = catalog.list_authors().await?;

    let author_options: String = authors
        .iter()
        .map(|a| format!("<option value=\"{}\">{}</option>", a.id, escape(&a.name)))
        .collect();
    let author_hint = if authors.is_empty() {
        "<p class=\"summary\">No authors yet. <a href=\"/add_author\">Add an author</a> first.</p>"
    } else {
        ""
    };

    let mut vars = HashMap::new();
    vars.insert("author_options", author_options);
    vars.insert("author_hint", author_hint.to_string());
    let content = render(ADD_BOOK_TEMPLATE, &vars);

    Ok(page_response(&req, "Add book", &content))
}

pub(crate) async fn post_add(
    form: web::Form<BookForm>,
    catalog: web::Data<Catalog>,
) -> crate::ServerResult {
    let book = match form.validate() {
        Ok(book) => book,
        Err(e) => {
            warn!("Rejected book submission: {e}");
            return Ok(flash::redirect("/add_book", &Flashes::error(e.to_string())));
        }
    };

    let title = book.title.clone();
    let flashes = match catalog.add_book(book).await {
        Ok(id) => {
            info!("Added book {id} ({title})");
            Flashes::success(format!("Book '{title}' added successfully."))
        }
        Err(e) => match e.rejection() {
            Some(DbError::AuthorNotFound(_)) => {
                warn!("Rejected book submission: {e}");
                Flashes::error("Selected author does not exist.")
            }
            Some(reason) => {
                warn!("Rejected book submission: {reason}");
                Flashes::error(format!("{reason}."))
            }
            None => {
                error!("Failed to add book '{title}': {e}");
                Flashes::error("Could not add the book, please try again.")
            }
        },
    };

    Ok(flash::redirect("/add_book", &flashes))
}

fn not_found(id: i64) -> HttpResponse {
    let content = format!(
        "<h1>Not found</h1><p>There is no book with id {id}.</p><p><a href=\"/\">Back to the library</a></p>"
    );
    HttpResponse::NotFound()
        .insert_header(http::header::ContentType(mime::TEXT_HTML_UTF_8))
        .insert_header(crate::cache_control_no_store())
        .body(render_page("Book not found", "", &content))
}

pub(crate) async fn delete(id: web::Path<i64>, catalog: web::Data<Catalog>) -> crate::ServerResult {
    let id = id.into_inner();

    let flashes = match catalog.delete_book(id).await {
        Ok(removal) => {
            info!("Deleted book {id} ({})", removal.book.title);
            let mut flashes = Flashes::success(format!("Book '{}' deleted.", removal.book.title));
            if let Some(author) = removal.removed_author {
                info!("Deleted author {} ({}) with their last book", author.id, author.name);
                flashes.push(
                    Level::Success,
                    format!(
                        "Author '{}' had no remaining books and was deleted too.",
                        author.name
                    ),
                );
            }
            flashes
        }
        Err(e) if e.is_not_found() => {
            warn!("Delete requested for missing book {id}");
            return Ok(not_found(id));
        }
        Err(e) => {
            error!("Failed to delete book {id}: {e}");
            Flashes::error("Could not delete the book, please try again.")
        }
    };

    Ok(flash::redirect("/", &flashes))
}
