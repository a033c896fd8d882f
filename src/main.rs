use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;
use std::path::Path;
use std::sync::Arc;

mod api;
mod config;
mod docs;
mod error;
mod insight;
mod ledger;
mod model;
mod routes;
mod store;
mod utils;

use config::Config;
use store::HrStore;

use crate::docs::ApiDoc;
use crate::utils::insight_cache;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Pakque HRM service is running. API docs at /swagger-ui/"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let store = Arc::new(
        HrStore::open(Path::new(&config.data_dir)).map_err(std::io::Error::other)?,
    );

    // 👇 clone what you need BEFORE moving config
    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    let store_for_warmup = store.clone();
    let config_for_warmup = config.clone();
    actix_web::rt::spawn(async move {
        if let Err(e) =
            insight_cache::warmup_insight_cache(&store_for_warmup, &config_for_warmup).await
        {
            eprintln!("Failed to warmup insight cache: {:?}", e);
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::from(store.clone()))
            .app_data(Data::new(config.clone()))
            .service(index)
            // API routes behind the rate limiter
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
