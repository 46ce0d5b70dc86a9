use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    database::Store,
    models::{Address, GetAddressRequest, RegisterUserRequest, UpdateAddressRequest, UserResponse},
    services::user_service,
    utils::AppError,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub success: bool,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressListResponse {
    pub success: bool,
    pub addresses: Vec<Address>,
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User created", body = UserEnvelope),
        (status = 200, description = "Phone number already registered", body = UserEnvelope),
        (status = 400, description = "Invalid phone number", body = super::ErrorResponse)
    )
)]
pub async fn register_user(
    store: web::Data<dyn Store>,
    body: web::Json<RegisterUserRequest>,
) -> Result<HttpResponse, AppError> {
    let registration = user_service::register_user(store.get_ref(), body.into_inner()).await?;

    let envelope = UserEnvelope {
        success: true,
        user: UserResponse::from(registration.user),
    };
    if registration.created {
        Ok(HttpResponse::Created().json(envelope))
    } else {
        Ok(HttpResponse::Ok().json(envelope))
    }
}

#[utoipa::path(
    post,
    path = "/api/users/updateAddress",
    tag = "Users",
    request_body = UpdateAddressRequest,
    responses(
        (status = 200, description = "Updated address list", body = AddressListResponse),
        (status = 400, description = "Invalid address or index", body = super::ErrorResponse),
        (status = 404, description = "User not found", body = super::ErrorResponse)
    )
)]
pub async fn update_address(
    store: web::Data<dyn Store>,
    body: web::Json<UpdateAddressRequest>,
) -> Result<HttpResponse, AppError> {
    let addresses = user_service::update_address(store.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(AddressListResponse {
        success: true,
        addresses,
    }))
}

#[utoipa::path(
    post,
    path = "/api/users/getAddress",
    tag = "Users",
    request_body = GetAddressRequest,
    responses(
        (status = 200, description = "Saved addresses", body = AddressListResponse),
        (status = 404, description = "User not found", body = super::ErrorResponse)
    )
)]
pub async fn get_addresses(
    store: web::Data<dyn Store>,
    body: web::Json<GetAddressRequest>,
) -> Result<HttpResponse, AppError> {
    let addresses = user_service::get_addresses(store.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(AddressListResponse {
        success: true,
        addresses,
    }))
}
