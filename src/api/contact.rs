use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::ContactRequest,
    services::{mail_service, MailRelay},
    utils::AppError,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/contactus",
    tag = "Contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message relayed to support", body = ContactResponse),
        (status = 400, description = "Invalid submission", body = super::ErrorResponse),
        (status = 500, description = "Mail relay failed", body = super::ErrorResponse)
    )
)]
pub async fn contact_us(
    relay: web::Data<dyn MailRelay>,
    body: web::Json<ContactRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("✉️  POST /contactus - from {}", body.email);

    mail_service::relay_contact(relay.get_ref(), body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ContactResponse {
        success: true,
        message: "Message sent successfully".to_string(),
    }))
}
