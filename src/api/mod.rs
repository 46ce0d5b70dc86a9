pub mod contact;
pub mod content;
pub mod health;
pub mod orders;
pub mod reviews;
pub mod shirts;
pub mod swagger;
pub mod users;

use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::utils::AppError;

/// Corpo de erro padrão: `{"success": false, "error": "..."}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Registers every route plus the extractor configs that turn malformed
/// JSON bodies, paths and query strings into 400s with the JSON error body.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::validation(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::validation(err.to_string()).into()),
    )
    // Health check
    .route("/health", web::get().to(health::health_check))
    .service(
        web::scope("/api")
            // ==================== CATALOG ====================
            .route("/carousel", web::get().to(content::get_carousel))
            .route("/shirts", web::get().to(shirts::list_shirts))
            .route("/shirts", web::post().to(shirts::create_shirt))
            .route("/shirts/{id}", web::get().to(shirts::get_shirt))
            .route("/reviews", web::get().to(reviews::list_reviews))
            .route("/reviews", web::post().to(reviews::create_review))
            // ==================== ORDERS ====================
            .service(
                web::scope("/orders")
                    .route("/confirm", web::post().to(orders::confirm_order))
                    .route("/new", web::get().to(orders::list_orders))
                    .route("/update/{id}", web::patch().to(orders::update_order_status))
                    .route("/{userPhone}", web::get().to(orders::list_user_orders)) // DEVE FICAR POR ÚLTIMO
            )
            // ==================== STATIC CONTENT ====================
            .route("/privacy-policy", web::get().to(content::get_privacy_policy))
            .route("/t&c", web::get().to(content::get_terms))
            .route("/return-policy", web::get().to(content::get_return_policy))
            .route("/shipping-info", web::get().to(content::get_shipping_info))
            .route("/discounts", web::get().to(content::get_discounts))
            .route("/contactus", web::post().to(contact::contact_us))
            // ==================== USERS ====================
            .service(
                web::scope("/users")
                    .route("", web::post().to(users::register_user))
                    .route("/updateAddress", web::post().to(users::update_address))
                    .route("/getAddress", web::post().to(users::get_addresses)),
            ),
    );
}

/// Default service for anything `configure` does not route
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        success: false,
        error: "Route not found".to_string(),
    })
}
