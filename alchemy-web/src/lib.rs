#![warn(clippy::dbg_macro)]

//! Book Alchemy: a server-rendered catalog of authors and books.
//!
//! The binary wires [`configure`] into an actix-web server together with a
//! [`Catalog`] and a [`Config`]. Tests build the same app in-process.

use std::fmt::Display;

use actix_web::{HttpResponse, http, web};

use error::{AppError, CatalogError};

pub mod catalog;
pub mod config;
pub mod error;

mod author;
mod book;
mod flash;
mod form;
mod health;
mod root;
mod template;
mod version;

pub use catalog::Catalog;
pub use config::Config;

pub const CARGO_NAME: &str = env!("CARGO_PKG_NAME");
pub const CARGO_VERSION: &str = env!("CARGO_PKG_VERSION");

fn cache_control_no_store() -> http::header::CacheControl {
    http::header::CacheControl(vec![http::header::CacheDirective::NoStore])
}

/// Register every route. Expects `web::Data<Catalog>` and `web::Data<Config>`
/// in the app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root::get))
        .route("/add_author", web::get().to(author::get))
        .route("/add_author", web::post().to(author::post))
        .route("/add_book", web::get().to(book::get_add))
        .route("/add_book", web::post().to(book::post_add))
        .route("/book/{id}/delete", web::post().to(book::delete))
        .route("/health", web::get().to(health::get))
        .route("/version", web::get().to(version::get));
}

#[derive(Debug)]
struct HttpError {
    err: AppError,
}

impl Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.err)
    }
}

impl actix_web::error::ResponseError for HttpError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match &self.err {
            e if e.is_not_found() => StatusCode::NOT_FOUND,
            AppError::Catalog(CatalogError::Task { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!("Request failed: {}", self.err);
        HttpResponse::build(self.status_code())
            .insert_header(cache_control_no_store())
            .body("Something went wrong while talking to the catalog.\n")
    }
}

impl From<AppError> for HttpError {
    fn from(err: AppError) -> HttpError {
        HttpError { err }
    }
}

type ServerResult = std::result::Result<HttpResponse, HttpError>;
