// Typed gateway over the six storefront collections.
//
// Handlers and services only see `dyn Store`; `main` injects the MongoDB
// implementation and the tests inject `memory::InMemoryStore`.

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;

use super::{MongoDB, CONTENT, DISCOUNTS, ORDERS, REVIEWS, SHIRTS, USERS};
use crate::models::{Address, ContentDocument, ContentKind, Discount, Order, Review, Shirt, SubCategory, User};
use crate::utils::AppError;

#[async_trait]
pub trait Store: Send + Sync {
    // ==================== USERS ====================

    async fn find_user(&self, phone: &str) -> Result<Option<User>, AppError>;

    /// Returns `None` when the phone number is already registered
    async fn insert_user(&self, user: User) -> Result<Option<User>, AppError>;

    /// Appends a copy of `order` to the user's order list. `false` if no user matched.
    async fn push_user_order(&self, phone: &str, order: &Order) -> Result<bool, AppError>;

    /// Rewrites status/trackingLink of the user's copy of `order_id`.
    /// `false` if no user holds that order.
    async fn set_user_order_state(
        &self,
        phone: &str,
        order_id: ObjectId,
        status: &str,
        tracking_link: &str,
    ) -> Result<bool, AppError>;

    async fn push_user_address(&self, phone: &str, address: &Address) -> Result<Option<User>, AppError>;

    /// Replaces an existing address; `None` if the user or the index is missing
    async fn set_user_address(
        &self,
        phone: &str,
        index: usize,
        address: &Address,
    ) -> Result<Option<User>, AppError>;

    // ==================== ORDERS ====================

    async fn insert_order(&self, order: &Order) -> Result<(), AppError>;

    async fn find_order(&self, id: ObjectId) -> Result<Option<Order>, AppError>;

    /// Newest first
    async fn list_orders(&self) -> Result<Vec<Order>, AppError>;

    /// Sets status (and trackingLink when given), returning the updated document
    async fn update_order_state(
        &self,
        id: ObjectId,
        status: &str,
        tracking_link: Option<&str>,
    ) -> Result<Option<Order>, AppError>;

    // ==================== CATALOG ====================

    /// Newest first, optionally restricted to one sub-category
    async fn list_shirts(&self, sub_category: Option<SubCategory>) -> Result<Vec<Shirt>, AppError>;

    async fn find_shirt(&self, id: ObjectId) -> Result<Option<Shirt>, AppError>;

    async fn insert_shirt(&self, shirt: Shirt) -> Result<Shirt, AppError>;

    /// Newest first
    async fn list_reviews(&self) -> Result<Vec<Review>, AppError>;

    async fn insert_review(&self, review: Review) -> Result<Review, AppError>;

    // ==================== CONTENT ====================

    /// Most recently updated first
    async fn list_content(&self, kind: ContentKind) -> Result<Vec<ContentDocument>, AppError>;

    async fn list_active_discounts(&self) -> Result<Vec<Discount>, AppError>;
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}

#[async_trait]
impl Store for MongoDB {
    async fn find_user(&self, phone: &str) -> Result<Option<User>, AppError> {
        let user = self
            .collection::<User>(USERS)
            .find_one(doc! { "phoneNumber": phone })
            .await?;
        Ok(user)
    }

    async fn insert_user(&self, mut user: User) -> Result<Option<User>, AppError> {
        match self.collection::<User>(USERS).insert_one(&user).await {
            Ok(result) => {
                user.id = result.inserted_id.as_object_id();
                Ok(Some(user))
            }
            Err(e) if is_duplicate_key(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn push_user_order(&self, phone: &str, order: &Order) -> Result<bool, AppError> {
        let entry = mongodb::bson::to_bson(order)?;
        let result = self
            .collection::<Document>(USERS)
            .update_one(
                doc! { "phoneNumber": phone },
                doc! { "$push": { "orders": entry } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn set_user_order_state(
        &self,
        phone: &str,
        order_id: ObjectId,
        status: &str,
        tracking_link: &str,
    ) -> Result<bool, AppError> {
        let result = self
            .collection::<Document>(USERS)
            .update_one(
                doc! { "phoneNumber": phone, "orders._id": order_id },
                doc! { "$set": {
                    "orders.$.status": status,
                    "orders.$.trackingLink": tracking_link
                } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn push_user_address(&self, phone: &str, address: &Address) -> Result<Option<User>, AppError> {
        let entry = mongodb::bson::to_bson(address)?;
        let user = self
            .collection::<User>(USERS)
            .find_one_and_update(
                doc! { "phoneNumber": phone },
                doc! { "$push": { "addresses": entry } },
            )
            .return_document(ReturnDocument::After)
            .await?;
        Ok(user)
    }

    async fn set_user_address(
        &self,
        phone: &str,
        index: usize,
        address: &Address,
    ) -> Result<Option<User>, AppError> {
        let path = format!("addresses.{}", index);
        let entry = mongodb::bson::to_bson(address)?;

        // Without the $exists guard Mongo would pad the array with nulls
        let mut filter = doc! { "phoneNumber": phone };
        filter.insert(path.clone(), doc! { "$exists": true });

        let mut set = Document::new();
        set.insert(path, entry);

        let user = self
            .collection::<User>(USERS)
            .find_one_and_update(filter, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(user)
    }

    async fn insert_order(&self, order: &Order) -> Result<(), AppError> {
        self.collection::<Order>(ORDERS).insert_one(order).await?;
        Ok(())
    }

    async fn find_order(&self, id: ObjectId) -> Result<Option<Order>, AppError> {
        let order = self
            .collection::<Order>(ORDERS)
            .find_one(doc! { "_id": id })
            .await?;
        Ok(order)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        let orders = self
            .collection::<Order>(ORDERS)
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(orders)
    }

    async fn update_order_state(
        &self,
        id: ObjectId,
        status: &str,
        tracking_link: Option<&str>,
    ) -> Result<Option<Order>, AppError> {
        let mut set = doc! { "status": status };
        if let Some(link) = tracking_link {
            set.insert("trackingLink", link);
        }

        let order = self
            .collection::<Order>(ORDERS)
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(order)
    }

    async fn list_shirts(&self, sub_category: Option<SubCategory>) -> Result<Vec<Shirt>, AppError> {
        let filter = match sub_category {
            Some(sub) => doc! { "subCategory": sub.as_str() },
            None => doc! {},
        };

        let shirts = self
            .collection::<Shirt>(SHIRTS)
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(shirts)
    }

    async fn find_shirt(&self, id: ObjectId) -> Result<Option<Shirt>, AppError> {
        let shirt = self
            .collection::<Shirt>(SHIRTS)
            .find_one(doc! { "_id": id })
            .await?;
        Ok(shirt)
    }

    async fn insert_shirt(&self, mut shirt: Shirt) -> Result<Shirt, AppError> {
        let result = self.collection::<Shirt>(SHIRTS).insert_one(&shirt).await?;
        shirt.id = result.inserted_id.as_object_id();
        Ok(shirt)
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, AppError> {
        let reviews = self
            .collection::<Review>(REVIEWS)
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(reviews)
    }

    async fn insert_review(&self, mut review: Review) -> Result<Review, AppError> {
        let result = self.collection::<Review>(REVIEWS).insert_one(&review).await?;
        review.id = result.inserted_id.as_object_id();
        Ok(review)
    }

    async fn list_content(&self, kind: ContentKind) -> Result<Vec<ContentDocument>, AppError> {
        let documents = self
            .collection::<ContentDocument>(CONTENT)
            .find(doc! { "kind": kind.as_str() })
            .sort(doc! { "updatedAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(documents)
    }

    async fn list_active_discounts(&self) -> Result<Vec<Discount>, AppError> {
        let discounts = self
            .collection::<Discount>(DISCOUNTS)
            .find(doc! { "isActive": { "$ne": false } })
            .await?
            .try_collect()
            .await?;
        Ok(discounts)
    }
}
