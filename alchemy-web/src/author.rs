use actix_web::{HttpRequest, web};
use tracing::{error, info, warn};

use crate::catalog::Catalog;
use crate::flash::{self, Flashes};
use crate::form::AuthorForm;
use crate::template::{ADD_AUTHOR_TEMPLATE, page_response};

const GENERIC_FAILURE: &str = "Could not add the author, please try again.";

pub(crate) async fn get(req: HttpRequest) -> crate::ServerResult {
    Ok(page_response(&req, "Add author", ADD_AUTHOR_TEMPLATE))
}

pub(crate) async fn post(
    form: web::Form<AuthorForm>,
    catalog: web::Data<Catalog>,
) -> crate::ServerResult {
    let author = match form.validate() {
        Ok(author) => author,
        Err(e) => {
            warn!("Rejected author submission: {e}");
            return Ok(flash::redirect("/add_author", &Flashes::error(e.to_string())));
        }
    };

    let name = author.name.clone();
    let flashes = match catalog.add_author(author).await {
        Ok(id) => {
            info!("Added author {id} ({name})");
            Flashes::success(format!("Author '{name}' added successfully."))
        }
        Err(e) => match e.rejection() {
            Some(reason) => {
                warn!("Rejected author submission: {reason}");
                Flashes::error(format!("{reason}."))
            }
            None => {
                error!("Failed to add author '{name}': {e}");
                Flashes::error(GENERIC_FAILURE)
            }
        },
    };

    Ok(flash::redirect("/add_author", &flashes))
}
