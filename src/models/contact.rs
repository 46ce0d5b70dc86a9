use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::validation::trimmed;

/// POST /api/contactus
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ContactRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 5000, message = "message must be 1-5000 characters"))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_validation() {
        let ok = ContactRequest {
            name: "Meera".to_string(),
            email: "meera@example.com".to_string(),
            message: "Where is my parcel?".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = ContactRequest {
            email: "not-an-email".to_string(),
            ..ok
        };
        assert!(bad.validate().is_err());
    }
}
