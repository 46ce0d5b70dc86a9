// In-memory `Store` used by the service and route tests.
// Mirrors the MongoDB semantics the services depend on: ordering, $push copies,
// positional updates matched on phone + order id.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::Store;
use crate::models::{Address, ContentDocument, ContentKind, Discount, Order, Review, Shirt, SubCategory, User};
use crate::utils::AppError;

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    orders: Vec<Order>,
    shirts: Vec<Shirt>,
    reviews: Vec<Review>,
    content: Vec<ContentDocument>,
    discounts: Vec<Discount>,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Collections>,
    /// When set, writes into `users.orders` fail like a dropped connection
    order_mirror_down: AtomicBool,
}

fn newest_first<T: Clone>(items: &[T], key: impl Fn(&T) -> i64) -> Vec<T> {
    // Stable sort over reversed insertion order: ties go to the latest insert
    let mut sorted: Vec<T> = items.iter().rev().cloned().collect();
    sorted.sort_by_key(|item| std::cmp::Reverse(key(item)));
    sorted
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_content(&self, document: ContentDocument) {
        self.inner.write().await.content.push(document);
    }

    pub async fn seed_discount(&self, discount: Discount) {
        self.inner.write().await.discounts.push(discount);
    }

    pub async fn seed_shirt(&self, mut shirt: Shirt) -> ObjectId {
        let id = ObjectId::new();
        shirt.id = Some(id);
        self.inner.write().await.shirts.push(shirt);
        id
    }

    pub async fn order_count(&self) -> usize {
        self.inner.read().await.orders.len()
    }

    pub fn fail_order_mirror(&self) {
        self.order_mirror_down.store(true, Ordering::SeqCst);
    }

    fn check_order_mirror(&self) -> Result<(), AppError> {
        if self.order_mirror_down.load(Ordering::SeqCst) {
            return Err(AppError::internal("users collection unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn find_user(&self, phone: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.phone_number == phone).cloned())
    }

    async fn insert_user(&self, mut user: User) -> Result<Option<User>, AppError> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.phone_number == user.phone_number) {
            return Ok(None);
        }
        user.id = Some(ObjectId::new());
        inner.users.push(user.clone());
        Ok(Some(user))
    }

    async fn push_user_order(&self, phone: &str, order: &Order) -> Result<bool, AppError> {
        self.check_order_mirror()?;
        let mut inner = self.inner.write().await;
        match inner.users.iter_mut().find(|u| u.phone_number == phone) {
            Some(user) => {
                user.orders.push(order.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_user_order_state(
        &self,
        phone: &str,
        order_id: ObjectId,
        status: &str,
        tracking_link: &str,
    ) -> Result<bool, AppError> {
        self.check_order_mirror()?;
        let mut inner = self.inner.write().await;
        let entry = inner
            .users
            .iter_mut()
            .filter(|u| u.phone_number == phone)
            .flat_map(|u| u.orders.iter_mut())
            .find(|o| o.id == Some(order_id));

        match entry {
            Some(order) => {
                order.status = status.to_string();
                order.tracking_link = tracking_link.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn push_user_address(&self, phone: &str, address: &Address) -> Result<Option<User>, AppError> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .users
            .iter_mut()
            .find(|u| u.phone_number == phone)
            .map(|user| {
                user.addresses.push(address.clone());
                user.clone()
            }))
    }

    async fn set_user_address(
        &self,
        phone: &str,
        index: usize,
        address: &Address,
    ) -> Result<Option<User>, AppError> {
        let mut inner = self.inner.write().await;
        let Some(user) = inner.users.iter_mut().find(|u| u.phone_number == phone) else {
            return Ok(None);
        };
        match user.addresses.get_mut(index) {
            Some(slot) => {
                *slot = address.clone();
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn insert_order(&self, order: &Order) -> Result<(), AppError> {
        self.inner.write().await.orders.push(order.clone());
        Ok(())
    }

    async fn find_order(&self, id: ObjectId) -> Result<Option<Order>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.orders.iter().find(|o| o.id == Some(id)).cloned())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        let inner = self.inner.read().await;
        Ok(newest_first(&inner.orders, |o| o.created_at))
    }

    async fn update_order_state(
        &self,
        id: ObjectId,
        status: &str,
        tracking_link: Option<&str>,
    ) -> Result<Option<Order>, AppError> {
        let mut inner = self.inner.write().await;
        Ok(inner.orders.iter_mut().find(|o| o.id == Some(id)).map(|order| {
            order.status = status.to_string();
            if let Some(link) = tracking_link {
                order.tracking_link = link.to_string();
            }
            order.clone()
        }))
    }

    async fn list_shirts(&self, sub_category: Option<SubCategory>) -> Result<Vec<Shirt>, AppError> {
        let inner = self.inner.read().await;
        let matching: Vec<Shirt> = inner
            .shirts
            .iter()
            .filter(|s| sub_category.map_or(true, |sub| s.sub_category == sub))
            .cloned()
            .collect();
        Ok(newest_first(&matching, |s| s.created_at))
    }

    async fn find_shirt(&self, id: ObjectId) -> Result<Option<Shirt>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.shirts.iter().find(|s| s.id == Some(id)).cloned())
    }

    async fn insert_shirt(&self, mut shirt: Shirt) -> Result<Shirt, AppError> {
        shirt.id = Some(ObjectId::new());
        self.inner.write().await.shirts.push(shirt.clone());
        Ok(shirt)
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, AppError> {
        let inner = self.inner.read().await;
        Ok(newest_first(&inner.reviews, |r| r.created_at))
    }

    async fn insert_review(&self, mut review: Review) -> Result<Review, AppError> {
        review.id = Some(ObjectId::new());
        self.inner.write().await.reviews.push(review.clone());
        Ok(review)
    }

    async fn list_content(&self, kind: ContentKind) -> Result<Vec<ContentDocument>, AppError> {
        let inner = self.inner.read().await;
        let matching: Vec<ContentDocument> =
            inner.content.iter().filter(|c| c.kind == kind).cloned().collect();
        Ok(newest_first(&matching, |c| c.updated_at))
    }

    async fn list_active_discounts(&self) -> Result<Vec<Discount>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.discounts.iter().filter(|d| d.is_active).cloned().collect())
    }
}
