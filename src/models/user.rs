use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::order::{Order, OrderResponse};
use crate::utils::validation::{trimmed, trimmed_opt, PHONE_RE, PINCODE_RE};

/// Cliente da loja, identificado pelo telefone (armazenado no MongoDB)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Unique key, 10 digits
    pub phone_number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub addresses: Vec<Address>,

    /// Denormalized copies of the user's orders, kept in sync by `order_service`
    #[serde(default)]
    pub orders: Vec<Order>,

    /// Product ids
    #[serde(default)]
    pub wishlist: Vec<String>,

    #[serde(default)]
    pub created_at: i64,
}

impl User {
    pub fn new(phone_number: String, name: Option<String>, now: i64) -> Self {
        User {
            id: None,
            phone_number,
            name,
            addresses: vec![],
            orders: vec![],
            wishlist: vec![],
            created_at: now,
        }
    }
}

/// Endereço de entrega
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "fullName is required"))]
    pub full_name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(regex(path = *PHONE_RE, message = "phoneNumber must be 10 digits"))]
    pub phone_number: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 200, message = "addressLine1 is required"))]
    pub address_line1: String,

    #[serde(default, deserialize_with = "trimmed_opt", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200))]
    pub address_line2: Option<String>,

    #[serde(default, deserialize_with = "trimmed_opt", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100))]
    pub landmark: Option<String>,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "city is required"))]
    pub city: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "state is required"))]
    pub state: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(regex(path = *PINCODE_RE, message = "pincode must be 6 digits"))]
    pub pincode: String,
}

/// POST /api/users
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(regex(path = *PHONE_RE, message = "phoneNumber must be 10 digits"))]
    pub phone_number: String,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(max = 100))]
    pub name: Option<String>,
}

/// POST /api/users/updateAddress
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAddressRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(regex(path = *PHONE_RE, message = "phoneNumber must be 10 digits"))]
    pub phone_number: String,

    #[validate(nested)]
    pub address: Address,

    /// Replace the address at this position instead of appending
    #[serde(default)]
    pub index: Option<usize>,
}

/// POST /api/users/getAddress
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetAddressRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(regex(path = *PHONE_RE, message = "phoneNumber must be 10 digits"))]
    pub phone_number: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub addresses: Vec<Address>,
    pub orders: Vec<OrderResponse>,
    pub wishlist: Vec<String>,
    pub created_at: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            phone_number: user.phone_number,
            name: user.name,
            addresses: user.addresses,
            orders: user.orders.into_iter().map(OrderResponse::from).collect(),
            wishlist: user.wishlist,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_address() -> Address {
    Address {
        full_name: "Asha Rao".to_string(),
        phone_number: "9999999999".to_string(),
        address_line1: "12 MG Road".to_string(),
        address_line2: None,
        landmark: Some("Near metro".to_string()),
        city: "Bengaluru".to_string(),
        state: "Karnataka".to_string(),
        pincode: "560001".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_validation() {
        assert!(sample_address().validate().is_ok());

        let mut bad = sample_address();
        bad.pincode = "5600".to_string();
        bad.city = String::new();
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("pincode"));
        assert!(fields.contains_key("city"));
    }

    #[test]
    fn test_address_fields_are_trimmed() {
        let address: Address = serde_json::from_value(serde_json::json!({
            "fullName": "  Asha Rao ",
            "phoneNumber": " 9999999999",
            "addressLine1": "12 MG Road ",
            "addressLine2": "  ",
            "city": "Bengaluru",
            "state": "Karnataka",
            "pincode": "560001 "
        }))
        .unwrap();

        assert_eq!(address.full_name, "Asha Rao");
        assert_eq!(address.pincode, "560001");
        assert!(address.address_line2.is_none());
        assert!(address.validate().is_ok());
    }

    #[test]
    fn test_register_rejects_bad_phone() {
        let req = RegisterUserRequest {
            phone_number: "12345".to_string(),
            name: None,
        };
        assert!(req.validate().is_err());
    }
}
