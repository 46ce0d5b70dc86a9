use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    database::Store,
    models::{CreateReviewRequest, ReviewResponse},
    services::catalog_service,
    utils::AppError,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewEnvelope {
    pub success: bool,
    pub review: ReviewResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewListResponse {
    pub success: bool,
    pub reviews: Vec<ReviewResponse>,
    pub total: usize,
}

#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = "Reviews",
    responses(
        (status = 200, description = "Reviews, newest first", body = ReviewListResponse)
    )
)]
pub async fn list_reviews(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let reviews: Vec<ReviewResponse> = catalog_service::list_reviews(store.get_ref())
        .await?
        .into_iter()
        .map(ReviewResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ReviewListResponse {
        success: true,
        total: reviews.len(),
        reviews,
    }))
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "Reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review saved", body = ReviewEnvelope),
        (status = 400, description = "Invalid review (rating must be 1-5)", body = super::ErrorResponse)
    )
)]
pub async fn create_review(
    store: web::Data<dyn Store>,
    body: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("⭐ POST /reviews - {} stars from {}", body.rating, body.name);

    let review = catalog_service::create_review(store.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ReviewEnvelope {
        success: true,
        review: ReviewResponse::from(review),
    }))
}
