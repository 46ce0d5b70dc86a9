use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::validation::{trimmed, trimmed_opt};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub rating: i32,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

/// POST /api/reviews
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,

    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 2000, message = "comment is required"))]
    pub comment: String,

    #[serde(default, deserialize_with = "trimmed_opt")]
    pub product_id: Option<String>,
}

impl CreateReviewRequest {
    pub fn into_review(self, now: i64) -> Review {
        Review {
            id: None,
            name: self.name,
            rating: self.rating,
            comment: self.comment,
            product_id: self.product_id,
            created_at: now,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    pub name: String,
    pub rating: i32,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub created_at: i64,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        ReviewResponse {
            id: review.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: review.name,
            rating: review.rating,
            comment: review.comment,
            product_id: review.product_id,
            created_at: review.created_at,
        }
    }
}
