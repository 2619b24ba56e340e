use actix_web::HttpResponse;

use crate::{CARGO_NAME, CARGO_VERSION};

pub(crate) async fn get() -> HttpResponse {
    HttpResponse::Ok().body(format!("{CARGO_NAME} {CARGO_VERSION}\n"))
}
