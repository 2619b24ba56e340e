#![warn(clippy::dbg_macro)]

use std::time::Duration;

use actix_web::{App, HttpServer, middleware, web};
use alchemy_web::error::{IoErrorContext, Result};
use alchemy_web::{Catalog, config, configure};
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn inner_main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::load()?;
    let catalog = Catalog::open(&config.database_path)?;

    let catalog_data = web::Data::new(catalog);
    let config_data = web::Data::new(config.clone());

    info!("listening on {}", config.bind);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(catalog_data.clone())
            .app_data(config_data.clone())
            .configure(configure)
    })
    // default is 5 seconds, which is too small when doing mass requests on slow machines
    .client_request_timeout(Duration::from_secs(30))
    .workers(config.workers)
    .max_connection_rate(config.max_connection_rate)
    .bind(config.bind.clone())
    .io_context(format!("Failed to bind server to {}", config.bind))?;

    server.run().await.io_context("Failed to start server")?;
    info!("book-alchemy stopped");
    Ok(())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    inner_main().await.map_err(std::io::Error::other)
}
