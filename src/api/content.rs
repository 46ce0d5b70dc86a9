use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    database::Store,
    models::{ContentDocument, ContentKind, Discount},
    services::catalog_service,
    utils::AppError,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct CarouselResponse {
    pub success: bool,
    pub images: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PolicyResponse {
    pub success: bool,
    pub data: ContentDocument,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DiscountListResponse {
    pub success: bool,
    pub discounts: Vec<Discount>,
    pub total: usize,
}

#[utoipa::path(
    get,
    path = "/api/carousel",
    tag = "Content",
    responses(
        (status = 200, description = "Carousel images, newest first", body = CarouselResponse),
        (status = 404, description = "No carousel images", body = super::ErrorResponse)
    )
)]
pub async fn get_carousel(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let images = catalog_service::carousel_images(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(CarouselResponse { success: true, images }))
}

async fn policy(store: &dyn Store, kind: ContentKind) -> Result<HttpResponse, AppError> {
    let document = catalog_service::policy_document(store, kind).await?;
    Ok(HttpResponse::Ok().json(PolicyResponse {
        success: true,
        data: document,
    }))
}

#[utoipa::path(
    get,
    path = "/api/privacy-policy",
    tag = "Content",
    responses(
        (status = 200, description = "Privacy policy", body = PolicyResponse),
        (status = 404, description = "Not published", body = super::ErrorResponse)
    )
)]
pub async fn get_privacy_policy(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    policy(store.get_ref(), ContentKind::PrivacyPolicy).await
}

#[utoipa::path(
    get,
    path = "/api/t&c",
    tag = "Content",
    responses(
        (status = 200, description = "Terms and conditions", body = PolicyResponse),
        (status = 404, description = "Not published", body = super::ErrorResponse)
    )
)]
pub async fn get_terms(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    policy(store.get_ref(), ContentKind::Terms).await
}

#[utoipa::path(
    get,
    path = "/api/return-policy",
    tag = "Content",
    responses(
        (status = 200, description = "Return policy", body = PolicyResponse),
        (status = 404, description = "Not published", body = super::ErrorResponse)
    )
)]
pub async fn get_return_policy(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    policy(store.get_ref(), ContentKind::ReturnPolicy).await
}

#[utoipa::path(
    get,
    path = "/api/shipping-info",
    tag = "Content",
    responses(
        (status = 200, description = "Shipping info", body = PolicyResponse),
        (status = 404, description = "Not published", body = super::ErrorResponse)
    )
)]
pub async fn get_shipping_info(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    policy(store.get_ref(), ContentKind::ShippingInfo).await
}

#[utoipa::path(
    get,
    path = "/api/discounts",
    tag = "Content",
    responses(
        (status = 200, description = "Active discount codes", body = DiscountListResponse)
    )
)]
pub async fn get_discounts(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let discounts = catalog_service::active_discounts(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(DiscountListResponse {
        success: true,
        total: discounts.len(),
        discounts,
    }))
}
