// ==================== ORDER LIFECYCLE ====================
// Orders live in the `orders` collection (authoritative copy) and are mirrored
// into `users.orders` (denormalized copy read by GET /api/orders/{userPhone}).
//
// The two copies are written one after the other with no transaction. If the
// second write misses, the first one stays applied and the caller gets
// NotFound; nothing is rolled back. Concurrent status updates on the same
// order can likewise leave the user's copy stale.

use mongodb::bson::oid::ObjectId;

use crate::{
    database::Store,
    models::{CreateOrderRequest, Order, UpdateOrderStatusRequest},
    utils::{now_millis, validation::is_valid_phone, AppError},
};

/// Result of a create/update where the authoritative write went through
/// but the mirror into the user's record did not.
#[derive(Debug)]
pub struct UnsyncedOrder {
    pub order: Order,
    pub reason: AppError,
}

pub type OrderOutcome = Result<Order, OrderError>;

#[derive(Debug)]
pub enum OrderError {
    /// Nothing was written
    Rejected(AppError),
    /// The order document was written, the user mirror was not
    Unsynced(UnsyncedOrder),
}

impl From<AppError> for OrderError {
    fn from(e: AppError) -> Self {
        OrderError::Rejected(e)
    }
}

impl From<OrderError> for AppError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Rejected(e) => e,
            OrderError::Unsynced(unsynced) => unsynced.reason,
        }
    }
}

pub fn parse_order_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id.trim()).map_err(|_| AppError::validation("Invalid order ID"))
}

/// POST /api/orders/confirm
///
/// Persists the order, then appends a copy to the owner's order list. When no
/// user has `userPhone` the order stays persisted and `Unsynced` is returned.
pub async fn create_order(store: &dyn Store, request: CreateOrderRequest) -> OrderOutcome {
    request.check()?;

    let order = request.into_order(ObjectId::new(), now_millis());
    let order_id = order.id.map(|id| id.to_hex()).unwrap_or_default();

    store.insert_order(&order).await?;
    log::info!("🧾 Order {} saved for {}", order_id, order.user_phone);

    match store.push_user_order(&order.user_phone, &order).await {
        Ok(true) => Ok(order),
        Ok(false) => {
            log::warn!(
                "⚠️  Order {} persisted but no user has phone {}",
                order_id, order.user_phone
            );
            Err(OrderError::Unsynced(UnsyncedOrder {
                order,
                reason: AppError::not_found("User not found"),
            }))
        }
        Err(e) => {
            log::error!(
                "❌ Order {} persisted but copy into user {} failed: {}",
                order_id, order.user_phone, e
            );
            Err(OrderError::Unsynced(UnsyncedOrder { order, reason: e }))
        }
    }
}

/// GET /api/orders/new - every order, newest first
pub async fn list_orders(store: &dyn Store) -> Result<Vec<Order>, AppError> {
    store.list_orders().await
}

/// GET /api/orders/{userPhone} - the user's denormalized list, in stored order
pub async fn list_user_orders(store: &dyn Store, phone: &str) -> Result<Vec<Order>, AppError> {
    let phone = phone.trim();
    if !is_valid_phone(phone) {
        return Err(AppError::validation("userPhone must be 10 digits"));
    }

    let user = store
        .find_user(phone)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(user.orders)
}

/// PATCH /api/orders/update/{id}
///
/// Updates the authoritative order first, then copies its resulting
/// status/trackingLink onto the entry in the owner's order list.
pub async fn update_order_status(
    store: &dyn Store,
    order_id: &str,
    request: UpdateOrderStatusRequest,
) -> OrderOutcome {
    let id = parse_order_id(order_id)?;
    validator::Validate::validate(&request).map_err(AppError::from)?;

    let tracking_link = request.tracking_link.as_deref().map(str::trim);

    let order = store
        .update_order_state(id, &request.status, tracking_link)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    log::info!("🔄 Order {} status -> '{}'", id.to_hex(), order.status);

    let mirrored = store
        .set_user_order_state(&order.user_phone, id, &order.status, &order.tracking_link)
        .await;

    match mirrored {
        Ok(true) => Ok(order),
        Ok(false) => {
            log::warn!(
                "⚠️  Order {} updated but not found in orders of user {}",
                id.to_hex(), order.user_phone
            );
            Err(OrderError::Unsynced(UnsyncedOrder {
                order,
                reason: AppError::not_found("User or order entry not found"),
            }))
        }
        Err(e) => {
            log::error!(
                "❌ Order {} updated but user copy failed to sync: {}",
                id.to_hex(), e
            );
            Err(OrderError::Unsynced(UnsyncedOrder { order, reason: e }))
        }
    }
}
