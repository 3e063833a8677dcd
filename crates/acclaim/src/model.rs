//! Wire types for the Acclaim read API.
//!
//! Every resource response wraps its payload in a `data` envelope. Only the
//! fields the bot renders are modeled; unknown fields are ignored.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

/// A badge template as defined by the issuing organization.
#[derive(Clone, Debug, Deserialize)]
pub struct BadgeTemplate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub image: Image,
}

/// A badge issued to an individual earner. Same rendered shape as a template.
#[derive(Clone, Debug, Deserialize)]
pub struct Badge {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub image: Image,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Image {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::{ApiEnvelope, BadgeTemplate};

    #[test]
    fn template_envelope_deserializes_and_ignores_extras() {
        let raw = serde_json::json!({
            "data": {
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "name": "Rustacean",
                "description": "Ships production Rust.",
                "url": "https://www.youracclaim.com/org/example/badge/rustacean",
                "image": { "id": "img-1", "url": "https://cdn.example/images/abc.png" },
                "state": "active"
            }
        });

        let envelope: ApiEnvelope<BadgeTemplate> =
            serde_json::from_value(raw).expect("envelope should deserialize");
        assert_eq!(envelope.data.name, "Rustacean");
        assert_eq!(envelope.data.image.url, "https://cdn.example/images/abc.png");
    }

    #[test]
    fn optional_fields_default_to_none() {
        let raw = serde_json::json!({
            "data": {
                "name": "Minimal",
                "image": { "url": "https://cdn.example/images/min.png" }
            }
        });

        let envelope: ApiEnvelope<BadgeTemplate> =
            serde_json::from_value(raw).expect("envelope should deserialize");
        assert!(envelope.data.description.is_none());
        assert!(envelope.data.url.is_none());
    }
}
