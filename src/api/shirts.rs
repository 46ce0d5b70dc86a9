use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    database::Store,
    models::{CreateShirtRequest, ShirtQuery, ShirtResponse},
    services::catalog_service,
    utils::AppError,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ShirtEnvelope {
    pub success: bool,
    pub shirt: ShirtResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShirtListResponse {
    pub success: bool,
    pub shirts: Vec<ShirtResponse>,
    pub total: usize,
}

#[utoipa::path(
    get,
    path = "/api/shirts",
    tag = "Catalog",
    params(ShirtQuery),
    responses(
        (status = 200, description = "Products, newest first", body = ShirtListResponse),
        (status = 400, description = "Unknown sub-category", body = super::ErrorResponse)
    )
)]
pub async fn list_shirts(
    store: web::Data<dyn Store>,
    query: web::Query<ShirtQuery>,
) -> Result<HttpResponse, AppError> {
    let sub_category = query.into_inner().sub_category;

    let shirts: Vec<ShirtResponse> = catalog_service::list_shirts(store.get_ref(), sub_category)
        .await?
        .into_iter()
        .map(ShirtResponse::from)
        .collect();

    log::info!(
        "👕 GET /shirts (subCategory: {}) - {} products",
        sub_category.map(|s| s.as_str()).unwrap_or("all"),
        shirts.len()
    );

    Ok(HttpResponse::Ok().json(ShirtListResponse {
        success: true,
        total: shirts.len(),
        shirts,
    }))
}

#[utoipa::path(
    get,
    path = "/api/shirts/{id}",
    tag = "Catalog",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ShirtEnvelope),
        (status = 400, description = "Malformed id", body = super::ErrorResponse),
        (status = 404, description = "Product not found", body = super::ErrorResponse)
    )
)]
pub async fn get_shirt(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let shirt = catalog_service::get_shirt(store.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ShirtEnvelope {
        success: true,
        shirt: ShirtResponse::from(shirt),
    }))
}

#[utoipa::path(
    post,
    path = "/api/shirts",
    tag = "Catalog",
    request_body = CreateShirtRequest,
    responses(
        (status = 201, description = "Product created", body = ShirtEnvelope),
        (status = 400, description = "Invalid product", body = super::ErrorResponse)
    )
)]
pub async fn create_shirt(
    store: web::Data<dyn Store>,
    body: web::Json<CreateShirtRequest>,
) -> Result<HttpResponse, AppError> {
    let shirt = catalog_service::create_shirt(store.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ShirtEnvelope {
        success: true,
        shirt: ShirtResponse::from(shirt),
    }))
}
