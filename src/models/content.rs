use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Static storefront content (coleção `content`), keyed by `kind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ContentKind {
    Carousel,
    PrivacyPolicy,
    Terms,
    ReturnPolicy,
    ShippingInfo,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Carousel => "carousel",
            ContentKind::PrivacyPolicy => "privacyPolicy",
            ContentKind::Terms => "terms",
            ContentKind::ReturnPolicy => "returnPolicy",
            ContentKind::ShippingInfo => "shippingInfo",
        }
    }

    /// Human readable name used in 404 messages
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Carousel => "Carousel images",
            ContentKind::PrivacyPolicy => "Privacy policy",
            ContentKind::Terms => "Terms and conditions",
            ContentKind::ReturnPolicy => "Return policy",
            ContentKind::ShippingInfo => "Shipping info",
        }
    }
}

/// Read-only document; `_id` is not exposed
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    pub kind: ContentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_stored_value() {
        for kind in [
            ContentKind::Carousel,
            ContentKind::PrivacyPolicy,
            ContentKind::Terms,
            ContentKind::ReturnPolicy,
            ContentKind::ShippingInfo,
        ] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
        }
    }
}
