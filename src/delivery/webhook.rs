//! Chat channel: one JSON POST to the configured webhook.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::compose::WebhookPayload;
use crate::config::WebhookConfig;

/// Errors from the webhook channel. Never fatal to the request.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Webhook returned status {0}")]
    Status(StatusCode),
}

/// Result of a webhook attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Endpoint answered with a 2xx status.
    Delivered,
    /// No endpoint configured; nothing was sent.
    Skipped,
}

/// HTTP client for the chat webhook.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    url: Option<String>,
}

impl WebhookClient {
    /// Create a client from configuration. A missing URL yields a client
    /// that skips every post.
    pub fn new(config: &WebhookConfig) -> Result<Self, DeliveryError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let url = config
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    /// Create a client around an existing HTTP client.
    pub fn with_client(client: reqwest::Client, url: Option<String>) -> Self {
        Self { client, url }
    }

    /// Whether posts will actually be sent.
    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    /// Post the payload once. No retries.
    pub async fn post(&self, payload: &WebhookPayload) -> Result<WebhookOutcome, DeliveryError> {
        let Some(url) = &self.url else {
            return Ok(WebhookOutcome::Skipped);
        };

        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status(status));
        }
        Ok(WebhookOutcome::Delivered)
    }
}
