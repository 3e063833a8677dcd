//! Outbound message delivery through the Slack Web API.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::attachment::AttachmentMessage;

const SLACK_API_BASE_URL: &str = "https://slack.com/api";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("gateway transport failure: {0}")]
    Transport(String),
    #[error("slack api rejected the message: {0}")]
    Api(String),
}

/// Seam for everything the handlers send back to Slack. Production wires in
/// [`WebApiGateway`]; tests substitute recording fakes.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn send_text(&self, channel_id: &str, text: &str) -> Result<(), GatewayError>;
    async fn send_typing(&self, channel_id: &str) -> Result<(), GatewayError>;
    async fn post_message(&self, message: &AttachmentMessage) -> Result<(), GatewayError>;
}

#[derive(Default)]
pub struct NoopGateway;

#[async_trait]
impl Gateway for NoopGateway {
    async fn send_text(&self, _channel_id: &str, _text: &str) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn send_typing(&self, _channel_id: &str) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn post_message(&self, _message: &AttachmentMessage) -> Result<(), GatewayError> {
        Ok(())
    }
}

pub struct WebApiGateway {
    http: Client,
    base_url: String,
    token: SecretString,
}

#[derive(Debug, Deserialize)]
struct ApiAck {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

impl WebApiGateway {
    pub fn new(token: SecretString) -> Self {
        Self::with_base_url(token, SLACK_API_BASE_URL)
    }

    pub fn with_base_url(token: SecretString, base_url: impl Into<String>) -> Self {
        Self { http: Client::new(), base_url: base_url.into(), token }
    }

    async fn post_json(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<(), GatewayError> {
        let url = format!("{}/{method}", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|error| GatewayError::Transport(error.to_string()))?;

        let ack = response
            .json::<ApiAck>()
            .await
            .map_err(|error| GatewayError::Transport(error.to_string()))?;

        if !ack.ok {
            return Err(GatewayError::Api(
                ack.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl Gateway for WebApiGateway {
    async fn send_text(&self, channel_id: &str, text: &str) -> Result<(), GatewayError> {
        let body = serde_json::json!({
            "channel": channel_id,
            "text": text,
            "as_user": true,
        });
        self.post_json("chat.postMessage", &body).await
    }

    async fn send_typing(&self, channel_id: &str) -> Result<(), GatewayError> {
        // Typing indicators only exist on the realtime socket; the Web API
        // has no equivalent endpoint. Recorded here for trace visibility.
        debug!(channel_id, "typing indicator requested");
        Ok(())
    }

    async fn post_message(&self, message: &AttachmentMessage) -> Result<(), GatewayError> {
        let body = serde_json::to_value(message)
            .map_err(|error| GatewayError::Transport(error.to_string()))?;
        self.post_json("chat.postMessage", &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::ApiAck;

    #[test]
    fn ack_deserializes_with_and_without_error_detail() {
        let ok: ApiAck = serde_json::from_str(r#"{"ok":true}"#).expect("ack");
        assert!(ok.ok);
        assert!(ok.error.is_none());

        let failed: ApiAck =
            serde_json::from_str(r#"{"ok":false,"error":"channel_not_found"}"#).expect("ack");
        assert!(!failed.ok);
        assert_eq!(failed.error.as_deref(), Some("channel_not_found"));
    }
}
