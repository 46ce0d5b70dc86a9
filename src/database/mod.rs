pub mod store;

#[cfg(test)]
pub mod memory;

pub use store::Store;

use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;

pub const USERS: &str = "users";
pub const ORDERS: &str = "orders";
pub const SHIRTS: &str = "shirts";
pub const REVIEWS: &str = "reviews";
pub const CONTENT: &str = "content";
pub const DISCOUNTS: &str = "discounts";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.app_name = Some("storefront-service".to_string());
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.run_command(doc! { "ping": 1 }).await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Creates the indexes the queries rely on; failures are logged, not fatal
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let unique = IndexOptions::builder().unique(true).build();
        let indexes: Vec<(&str, Document, Option<IndexOptions>)> = vec![
            (USERS, doc! { "phoneNumber": 1 }, Some(unique)),
            (ORDERS, doc! { "createdAt": -1 }, None),
            (ORDERS, doc! { "userPhone": 1 }, None),
            (SHIRTS, doc! { "subCategory": 1, "createdAt": -1 }, None),
            (REVIEWS, doc! { "createdAt": -1 }, None),
            (CONTENT, doc! { "kind": 1, "updatedAt": -1 }, None),
        ];

        for (collection, keys, options) in indexes {
            let description = format!("{}({})", collection, keys);
            let model = IndexModel::builder().keys(keys).options(options).build();

            match self.collection::<Document>(collection).create_index(model).await {
                Ok(_) => log::info!("   ✅ Index ready: {}", description),
                Err(e) => log::warn!("   ⚠️  Index {} not created: {}", description, e),
            }
        }

        log::info!("✅ Database indexes ready");
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();

        let uri = std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&uri, "storefront_test").await;
        assert!(db.is_ok());
    }
}
