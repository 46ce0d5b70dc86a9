use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::user::Address;
use crate::utils::validation::{trimmed, trimmed_opt, PHONE_RE};

pub const CASH_ON_DELIVERY: &str = "cod";

/// Pedido (coleção `orders`, espelhado em `users.orders`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_phone: String,
    pub address: Address,
    pub cart_items: Vec<CartItem>,
    pub total_amount: f64,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    /// Empty until the operator ships the order
    #[serde(default)]
    pub tracking_link: String,
    /// Free text, no enumerated lifecycle
    #[serde(default)]
    pub status: String,
    pub created_at: i64,
}

/// Snapshot of a cart line at checkout time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "productId is required"))]
    pub product_id: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 10, message = "size is required"))]
    pub size: String,

    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,

    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,

    #[serde(default, deserialize_with = "trimmed_opt", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

pub fn is_cash_on_delivery(payment_method: &str) -> bool {
    payment_method.eq_ignore_ascii_case(CASH_ON_DELIVERY)
}

/// POST /api/orders/confirm
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(regex(path = *PHONE_RE, message = "userPhone must be 10 digits"))]
    pub user_phone: String,

    #[validate(nested)]
    pub address: Address,

    #[validate(nested)]
    pub cart_items: Vec<CartItem>,

    #[validate(range(min = 0.0, message = "totalAmount cannot be negative"))]
    pub total_amount: f64,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "paymentMethod is required"))]
    pub payment_method: String,

    #[serde(default, deserialize_with = "trimmed_opt")]
    pub payment_id: Option<String>,

    #[serde(default, deserialize_with = "trimmed_opt")]
    pub tracking_link: Option<String>,

    #[serde(default, deserialize_with = "trimmed_opt")]
    pub status: Option<String>,
}

impl CreateOrderRequest {
    /// Field rules plus the rules that span several fields
    pub fn check(&self) -> Result<(), crate::utils::AppError> {
        self.validate()?;

        if self.cart_items.is_empty() {
            return Err(crate::utils::AppError::validation("cartItems cannot be empty"));
        }

        if !is_cash_on_delivery(&self.payment_method) && self.payment_id.is_none() {
            return Err(crate::utils::AppError::validation(
                "paymentId is required unless paymentMethod is cod",
            ));
        }

        Ok(())
    }

    pub fn into_order(self, id: ObjectId, now: i64) -> Order {
        Order {
            id: Some(id),
            user_phone: self.user_phone,
            address: self.address,
            cart_items: self.cart_items,
            total_amount: self.total_amount,
            payment_method: self.payment_method,
            payment_id: self.payment_id,
            tracking_link: self.tracking_link.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            created_at: now,
        }
    }
}

/// PATCH /api/orders/update/{id}
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,

    /// Left unchanged when absent
    #[serde(default)]
    pub tracking_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub user_phone: String,
    pub address: Address,
    pub cart_items: Vec<CartItem>,
    pub total_amount: f64,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    pub tracking_link: String,
    pub status: String,
    pub created_at: i64,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_phone: order.user_phone,
            address: order.address,
            cart_items: order.cart_items,
            total_amount: order.total_amount,
            payment_method: order.payment_method,
            payment_id: order.payment_id,
            tracking_link: order.tracking_link,
            status: order.status,
            created_at: order.created_at,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_cart_item() -> CartItem {
    CartItem {
        product_id: "65f1c0ffee0000000000beef".to_string(),
        name: "Linen Shirt".to_string(),
        size: "M".to_string(),
        quantity: 1,
        price: 499.0,
        image: None,
    }
}

#[cfg(test)]
pub(crate) fn sample_order_request(phone: &str, payment_method: &str) -> CreateOrderRequest {
    CreateOrderRequest {
        user_phone: phone.to_string(),
        address: super::user::sample_address(),
        cart_items: vec![sample_cart_item()],
        total_amount: 499.0,
        payment_method: payment_method.to_string(),
        payment_id: None,
        tracking_link: None,
        status: None,
    }
}
