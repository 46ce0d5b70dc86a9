use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::utils::validation::{trimmed, trimmed_list, trimmed_opt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Men,
    Women,
    Unisex,
}

/// Second-level catalog category, used by the `?subCategory=` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubCategory {
    Casual,
    Formal,
    Printed,
    Oversized,
    Solid,
}

impl SubCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubCategory::Casual => "casual",
            SubCategory::Formal => "formal",
            SubCategory::Printed => "printed",
            SubCategory::Oversized => "oversized",
            SubCategory::Solid => "solid",
        }
    }
}

impl std::fmt::Display for SubCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produto do catálogo (coleção `shirts`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shirt {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    pub category: Category,
    pub sub_category: SubCategory,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn default_in_stock() -> bool {
    true
}

/// POST /api/shirts
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShirtRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(range(exclusive_min = 0.0, message = "price must be positive"))]
    pub price: f64,

    #[serde(default)]
    #[validate(range(exclusive_min = 0.0, message = "originalPrice must be positive"))]
    pub original_price: Option<f64>,

    #[serde(deserialize_with = "trimmed_list")]
    #[validate(length(min = 1, message = "at least one image is required"))]
    pub images: Vec<String>,

    #[serde(default, deserialize_with = "trimmed_list")]
    pub sizes: Vec<String>,

    pub category: Category,

    pub sub_category: SubCategory,

    #[serde(default)]
    pub in_stock: Option<bool>,
}

impl CreateShirtRequest {
    pub fn into_shirt(self, now: i64) -> Shirt {
        Shirt {
            id: None,
            name: self.name,
            description: self.description.unwrap_or_default(),
            price: self.price,
            original_price: self.original_price,
            images: self.images,
            sizes: self.sizes,
            category: self.category,
            sub_category: self.sub_category,
            in_stock: self.in_stock.unwrap_or(true),
            created_at: now,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShirtQuery {
    /// Filter by second-level category
    pub sub_category: Option<SubCategory>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShirtResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub category: Category,
    pub sub_category: SubCategory,
    pub in_stock: bool,
    pub created_at: i64,
}

impl From<Shirt> for ShirtResponse {
    fn from(shirt: Shirt) -> Self {
        ShirtResponse {
            id: shirt.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: shirt.name,
            description: shirt.description,
            price: shirt.price,
            original_price: shirt.original_price,
            images: shirt.images,
            sizes: shirt.sizes,
            category: shirt.category,
            sub_category: shirt.sub_category,
            in_stock: shirt.in_stock,
            created_at: shirt.created_at,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_shirt(name: &str, sub_category: SubCategory, created_at: i64) -> Shirt {
    Shirt {
        id: None,
        name: name.to_string(),
        description: String::new(),
        price: 799.0,
        original_price: Some(999.0),
        images: vec!["https://cdn.example.com/shirt.jpg".to_string()],
        sizes: vec!["M".to_string(), "L".to_string()],
        category: Category::Men,
        sub_category,
        in_stock: true,
        created_at,
    }
}
