use actix_web::{HttpResponse, web};
use tracing::error;

use crate::catalog::Catalog;

pub(crate) async fn get(catalog: web::Data<Catalog>) -> HttpResponse {
    match catalog.count_books().await {
        Ok(_) => HttpResponse::Ok()
            .insert_header(crate::cache_control_no_store())
            .body("OK\n"),
        Err(e) => {
            error!("Health check failed: {e}");
            HttpResponse::ServiceUnavailable()
                .insert_header(crate::cache_control_no_store())
                .body("UNAVAILABLE\n")
        }
    }
}
