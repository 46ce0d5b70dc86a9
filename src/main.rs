mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::database::Store;
use crate::services::{MailRelay, SmtpMailRelay};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("🚀 Starting Storefront Service...");
    log::info!("📊 Database: {}", config.database_name);

    // Initialize MongoDB connection
    let db = match database::MongoDB::new(&config.database_url, &config.database_name).await {
        Ok(db) => db,
        Err(e) => {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            std::process::exit(1);
        }
    };
    let store: Arc<dyn Store> = Arc::new(db);
    let store_data: web::Data<dyn Store> = web::Data::from(store);

    log::info!("✅ MongoDB connected successfully");

    // SMTP relay for the contact form
    let relay = match SmtpMailRelay::new(&config.mail) {
        Ok(relay) => relay,
        Err(e) => {
            log::error!("❌ Failed to configure SMTP relay: {}", e);
            std::process::exit(1);
        }
    };
    let relay: Arc<dyn MailRelay> = Arc::new(relay);
    let relay_data: web::Data<dyn MailRelay> = web::Data::from(relay);

    log::info!("📧 SMTP relay: {}:{}", config.mail.smtp_host, config.mail.smtp_port);

    let host = config.host.clone();
    let port = config.port;
    let cors_origin = config.cors_origin.clone();

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("🔓 CORS origin: {}", cors_origin);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST", "PATCH", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
                actix_web::http::header::AUTHORIZATION,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .app_data(relay_data.clone())
            .wrap(middleware::CatchAll)
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone())
            )
            .configure(api::configure)
            .default_service(web::to(api::not_found))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
