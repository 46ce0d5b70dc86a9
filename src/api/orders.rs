use actix_web::{web, HttpResponse, ResponseError};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    database::Store,
    models::{CreateOrderRequest, OrderResponse, UpdateOrderStatusRequest},
    services::order_service::{self, OrderError, UnsyncedOrder},
    utils::AppError,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderEnvelope {
    pub success: bool,
    pub order: OrderResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListResponse {
    pub success: bool,
    pub orders: Vec<OrderResponse>,
    pub total: usize,
}

/// The order document was written but the user's copy was not:
/// error status and message as usual, plus the id of the order that exists.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnsyncedOrderResponse {
    pub success: bool,
    pub error: String,
    pub order_id: String,
}

fn unsynced_response(unsynced: UnsyncedOrder) -> HttpResponse {
    let order_id = unsynced.order.id.map(|id| id.to_hex()).unwrap_or_default();
    log::warn!("⚠️  Order {} out of sync with user record: {}", order_id, unsynced.reason);

    HttpResponse::build(unsynced.reason.status_code()).json(UnsyncedOrderResponse {
        success: false,
        error: unsynced.reason.public_message().to_string(),
        order_id,
    })
}

fn order_list(orders: Vec<crate::models::Order>) -> OrderListResponse {
    let orders: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    OrderListResponse {
        success: true,
        total: orders.len(),
        orders,
    }
}

#[utoipa::path(
    post,
    path = "/api/orders/confirm",
    tag = "Orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed and added to the user's orders", body = OrderEnvelope),
        (status = 400, description = "Missing or malformed fields", body = super::ErrorResponse),
        (status = 404, description = "No user with this phone; the order is still saved", body = UnsyncedOrderResponse),
        (status = 500, description = "Copy into the user's record failed; the order is still saved", body = UnsyncedOrderResponse)
    )
)]
pub async fn confirm_order(
    store: web::Data<dyn Store>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🛒 POST /orders/confirm - user {} ({})", body.user_phone, body.payment_method);

    match order_service::create_order(store.get_ref(), body.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Created().json(OrderEnvelope {
            success: true,
            order: OrderResponse::from(order),
        })),
        Err(OrderError::Unsynced(unsynced)) => Ok(unsynced_response(unsynced)),
        Err(OrderError::Rejected(e)) => Err(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/orders/new",
    tag = "Orders",
    responses(
        (status = 200, description = "All orders, newest first", body = OrderListResponse)
    )
)]
pub async fn list_orders(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let orders = order_service::list_orders(store.get_ref()).await?;
    log::info!("📋 GET /orders/new - {} orders", orders.len());
    Ok(HttpResponse::Ok().json(order_list(orders)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{userPhone}",
    tag = "Orders",
    params(("userPhone" = String, Path, description = "10-digit phone number")),
    responses(
        (status = 200, description = "The user's orders in stored order", body = OrderListResponse),
        (status = 400, description = "Malformed phone number", body = super::ErrorResponse),
        (status = 404, description = "User not found", body = super::ErrorResponse)
    )
)]
pub async fn list_user_orders(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let phone = path.into_inner();
    log::info!("📋 GET /orders/{}", phone);

    let orders = order_service::list_user_orders(store.get_ref(), &phone).await?;
    Ok(HttpResponse::Ok().json(order_list(orders)))
}

#[utoipa::path(
    patch,
    path = "/api/orders/update/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "Order id")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order and user copy updated", body = OrderEnvelope),
        (status = 400, description = "Invalid id or status", body = super::ErrorResponse),
        (status = 404, description = "Order missing, or user copy missing (order still updated)", body = UnsyncedOrderResponse)
    )
)]
pub async fn update_order_status(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    body: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    log::info!("🔧 PATCH /orders/update/{} - status '{}'", order_id, body.status);

    match order_service::update_order_status(store.get_ref(), &order_id, body.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Ok().json(OrderEnvelope {
            success: true,
            order: OrderResponse::from(order),
        })),
        Err(OrderError::Unsynced(unsynced)) => Ok(unsynced_response(unsynced)),
        Err(OrderError::Rejected(e)) => Err(e),
    }
}
