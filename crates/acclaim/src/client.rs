//! HTTP client for organization badge and badge template reads.

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;

use badgey_core::config::AcclaimConfig;
use badgey_core::extract_uuid;

use crate::model::{ApiEnvelope, Badge, BadgeTemplate};

#[derive(Debug, Error)]
pub enum AcclaimError {
    #[error("no Acclaim API token is configured")]
    MissingToken,
    #[error("resource not found")]
    NotFound,
    #[error("badge image url `{0}` has no file segment")]
    InvalidImageUrl(String),
    #[error("acclaim request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("acclaim returned unexpected status {0}")]
    UnexpectedStatus(StatusCode),
}

/// Read-only client scoped to a single issuing organization.
#[derive(Clone)]
pub struct AcclaimClient {
    http: Client,
    base_url: String,
    organization_id: String,
    token: Option<SecretString>,
}

impl AcclaimClient {
    pub fn new(config: &AcclaimConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            organization_id: config.organization_id.clone(),
            token: config.token.clone(),
        }
    }

    pub async fn badge(&self, badge_id: &str) -> Result<Badge, AcclaimError> {
        let url = self.resource_url("badges", badge_id);
        Ok(self.fetch::<ApiEnvelope<Badge>>(&url).await?.data)
    }

    pub async fn badge_template(
        &self,
        template_id: &str,
    ) -> Result<BadgeTemplate, AcclaimError> {
        let url = self.resource_url("badge_templates", template_id);
        Ok(self.fetch::<ApiEnvelope<BadgeTemplate>>(&url).await?.data)
    }

    /// Extracts the first canonical UUID from free-form text and looks the
    /// badge up. Returns `NotFound` when the text contains no identifier.
    pub async fn resolve_badge(&self, text: &str) -> Result<Badge, AcclaimError> {
        let badge_id = extract_uuid(text).ok_or(AcclaimError::NotFound)?;
        self.badge(badge_id).await
    }

    /// Free-form text variant of [`badge_template`](Self::badge_template).
    pub async fn resolve_badge_template(&self, text: &str) -> Result<BadgeTemplate, AcclaimError> {
        let template_id = extract_uuid(text).ok_or(AcclaimError::NotFound)?;
        self.badge_template(template_id).await
    }

    fn resource_url(&self, collection: &str, resource_id: &str) -> String {
        format!(
            "{}/v1/organizations/{}/{collection}/{resource_id}",
            self.base_url, self.organization_id
        )
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, AcclaimError> {
        // Acclaim basic auth puts the token in the username slot with an
        // empty password.
        let token = self.token.as_ref().ok_or(AcclaimError::MissingToken)?;

        let response = self
            .http
            .get(url)
            .basic_auth(token.expose_secret(), Some(""))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<T>().await?),
            StatusCode::NOT_FOUND => Err(AcclaimError::NotFound),
            status => Err(AcclaimError::UnexpectedStatus(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use badgey_core::config::AcclaimConfig;

    use super::{AcclaimClient, AcclaimError};

    fn client(token: Option<&str>) -> AcclaimClient {
        AcclaimClient::new(&AcclaimConfig {
            token: token.map(|value| value.to_string().into()),
            base_url: "https://api.youracclaim.com/".to_string(),
            organization_id: "org-1".to_string(),
        })
    }

    #[test]
    fn resource_url_joins_base_org_and_collection() {
        let client = client(Some("secret"));
        assert_eq!(
            client.resource_url("badge_templates", "550e8400-e29b-41d4-a716-446655440000"),
            "https://api.youracclaim.com/v1/organizations/org-1/badge_templates/550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[tokio::test]
    async fn resolve_without_uuid_is_not_found() {
        let client = client(Some("secret"));
        let error = client.resolve_badge("no identifier here").await.unwrap_err();
        assert!(matches!(error, AcclaimError::NotFound));
    }

    #[tokio::test]
    async fn lookup_without_token_fails_before_any_request() {
        let client = client(None);
        let error = client
            .badge_template("550e8400-e29b-41d4-a716-446655440000")
            .await
            .unwrap_err();
        assert!(matches!(error, AcclaimError::MissingToken));
    }
}
