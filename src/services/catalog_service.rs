// Read passthroughs for products, reviews and static content.

use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::{
    database::Store,
    models::{
        ContentDocument, ContentKind, CreateReviewRequest, CreateShirtRequest, Discount, Review, Shirt,
        SubCategory,
    },
    utils::{now_millis, AppError},
};

pub async fn list_shirts(store: &dyn Store, sub_category: Option<SubCategory>) -> Result<Vec<Shirt>, AppError> {
    store.list_shirts(sub_category).await
}

pub async fn get_shirt(store: &dyn Store, id: &str) -> Result<Shirt, AppError> {
    let id = ObjectId::parse_str(id.trim()).map_err(|_| AppError::validation("Invalid product ID"))?;

    store
        .find_shirt(id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))
}

pub async fn create_shirt(store: &dyn Store, request: CreateShirtRequest) -> Result<Shirt, AppError> {
    request.validate()?;
    let shirt = store.insert_shirt(request.into_shirt(now_millis())).await?;
    log::info!("👕 Product created: {}", shirt.name);
    Ok(shirt)
}

pub async fn list_reviews(store: &dyn Store) -> Result<Vec<Review>, AppError> {
    store.list_reviews().await
}

pub async fn create_review(store: &dyn Store, request: CreateReviewRequest) -> Result<Review, AppError> {
    request.validate()?;
    store.insert_review(request.into_review(now_millis())).await
}

/// Images of every carousel document, newest document first. NotFound when empty.
pub async fn carousel_images(store: &dyn Store) -> Result<Vec<String>, AppError> {
    let images: Vec<String> = store
        .list_content(ContentKind::Carousel)
        .await?
        .into_iter()
        .flat_map(|doc| doc.images)
        .collect();

    if images.is_empty() {
        return Err(AppError::not_found(format!("{} not found", ContentKind::Carousel.label())));
    }
    Ok(images)
}

/// Latest document of a policy page
pub async fn policy_document(store: &dyn Store, kind: ContentKind) -> Result<ContentDocument, AppError> {
    store
        .list_content(kind)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::not_found(format!("{} not found", kind.label())))
}

pub async fn active_discounts(store: &dyn Store) -> Result<Vec<Discount>, AppError> {
    store.list_active_discounts().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::InMemoryStore;
    use crate::models::sample_shirt;

    fn content(kind: ContentKind, body: &str, images: &[&str], updated_at: i64) -> ContentDocument {
        ContentDocument {
            kind,
            title: None,
            content: body.to_string(),
            images: images.iter().map(|s| s.to_string()).collect(),
            updated_at,
        }
    }

    #[actix_rt::test]
    async fn test_shirts_filter_and_order() {
        let store = InMemoryStore::new();
        store.seed_shirt(sample_shirt("Old casual", SubCategory::Casual, 1)).await;
        store.seed_shirt(sample_shirt("Formal", SubCategory::Formal, 2)).await;
        store.seed_shirt(sample_shirt("New casual", SubCategory::Casual, 3)).await;

        let all = list_shirts(&store, None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "New casual");

        let casual = list_shirts(&store, Some(SubCategory::Casual)).await.unwrap();
        let names: Vec<_> = casual.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["New casual", "Old casual"]);
    }

    #[actix_rt::test]
    async fn test_get_shirt() {
        let store = InMemoryStore::new();
        let id = store.seed_shirt(sample_shirt("Oxford", SubCategory::Formal, 1)).await;

        assert_eq!(get_shirt(&store, &id.to_hex()).await.unwrap().name, "Oxford");
        assert!(matches!(
            get_shirt(&store, &ObjectId::new().to_hex()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(get_shirt(&store, "xyz").await, Err(AppError::Validation(_))));
    }

    #[actix_rt::test]
    async fn test_carousel_empty_is_not_found() {
        let store = InMemoryStore::new();
        assert!(matches!(carousel_images(&store).await, Err(AppError::NotFound(_))));

        store.seed_content(content(ContentKind::Carousel, "", &[], 1)).await;
        assert!(matches!(carousel_images(&store).await, Err(AppError::NotFound(_))));

        store.seed_content(content(ContentKind::Carousel, "", &["a.jpg", "b.jpg"], 2)).await;
        assert_eq!(carousel_images(&store).await.unwrap(), vec!["a.jpg", "b.jpg"]);
    }

    #[actix_rt::test]
    async fn test_policy_document_latest_wins() {
        let store = InMemoryStore::new();
        store.seed_content(content(ContentKind::Terms, "v1", &[], 10)).await;
        store.seed_content(content(ContentKind::Terms, "v2", &[], 20)).await;
        store.seed_content(content(ContentKind::PrivacyPolicy, "privacy", &[], 30)).await;

        let terms = policy_document(&store, ContentKind::Terms).await.unwrap();
        assert_eq!(terms.content, "v2");

        let missing = policy_document(&store, ContentKind::ShippingInfo).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[actix_rt::test]
    async fn test_review_validation() {
        let store = InMemoryStore::new();
        let bad = CreateReviewRequest {
            name: "Ravi".to_string(),
            rating: 9,
            comment: "ok".to_string(),
            product_id: None,
        };
        assert!(matches!(create_review(&store, bad).await, Err(AppError::Validation(_))));
        assert!(list_reviews(&store).await.unwrap().is_empty());
    }

    fn discount(code: &str, is_active: bool) -> Discount {
        Discount {
            code: code.to_string(),
            description: None,
            percentage: 10.0,
            min_order_amount: None,
            is_active,
            expires_at: None,
        }
    }

    #[actix_rt::test]
    async fn test_only_active_discounts() {
        let store = InMemoryStore::new();
        store.seed_discount(discount("WELCOME10", true)).await;
        store.seed_discount(discount("EXPIRED5", false)).await;

        let codes: Vec<_> = active_discounts(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.code)
            .collect();
        assert_eq!(codes, vec!["WELCOME10"]);
    }

    fn review_request(name: &str) -> CreateReviewRequest {
        CreateReviewRequest {
            name: name.to_string(),
            rating: 4,
            comment: "Soft fabric".to_string(),
            product_id: None,
        }
    }

    #[actix_rt::test]
    async fn test_reviews_newest_first() {
        let store = InMemoryStore::new();
        store.insert_review(review_request("Older").into_review(100)).await.unwrap();
        store.insert_review(review_request("Newer").into_review(200)).await.unwrap();

        let created = create_review(&store, review_request("Latest")).await.unwrap();
        assert!(created.id.is_some());

        let names: Vec<_> = list_reviews(&store).await.unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Latest", "Newer", "Older"]);
    }

    #[actix_rt::test]
    async fn test_create_shirt_is_listed() {
        let store = InMemoryStore::new();
        let request: CreateShirtRequest = serde_json::from_value(serde_json::json!({
            "name": "Printed tee",
            "price": 499.0,
            "images": ["tee.jpg"],
            "category": "unisex",
            "subCategory": "printed"
        }))
        .unwrap();

        let shirt = create_shirt(&store, request).await.unwrap();
        let fetched = get_shirt(&store, &shirt.id.unwrap().to_hex()).await.unwrap();
        assert_eq!(fetched.name, "Printed tee");
        assert_eq!(list_shirts(&store, Some(SubCategory::Printed)).await.unwrap().len(), 1);
    }
}
