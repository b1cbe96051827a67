//! Delivery dispatcher.
//!
//! # Data Flow
//! ```text
//! Composed { email, webhook }
//!     → mail.rs (SMTP relay; failure aborts the request)
//!     → webhook.rs (HTTP POST; failure is logged and absorbed)
//!     → DeliveryReport
//! ```
//!
//! # Design Decisions
//! - Strictly sequential: email first, webhook only after the relay accepted
//! - No retries on either channel
//! - The mail transport is a trait object so handlers can run against fakes

pub mod mail;
pub mod webhook;

use std::sync::Arc;

use crate::compose::{Composed, EmailMessage, WebhookPayload};
use crate::observability::metrics;

pub use mail::{Mailer, SmtpMailer, TransportError};
pub use webhook::{DeliveryError, WebhookClient, WebhookOutcome};

/// What happened on the webhook channel after a successful email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookStatus {
    Delivered,
    Skipped,
    Failed(String),
}

/// Outcome of a dispatch whose email went out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub webhook: WebhookStatus,
}

/// Sends composed requisitions over both channels.
#[derive(Clone)]
pub struct Dispatcher {
    mailer: Arc<dyn Mailer>,
    webhook: WebhookClient,
}

impl Dispatcher {
    pub fn new(mailer: Arc<dyn Mailer>, webhook: WebhookClient) -> Self {
        Self { mailer, webhook }
    }

    /// Whether the webhook channel is configured.
    pub fn webhook_enabled(&self) -> bool {
        self.webhook.is_enabled()
    }

    /// Send the email through the mail transport.
    pub async fn send_email(&self, message: &EmailMessage) -> Result<(), TransportError> {
        self.mailer.send(message).await
    }

    /// Post the chat payload, if a webhook is configured.
    pub async fn post_webhook(
        &self,
        payload: &WebhookPayload,
    ) -> Result<WebhookOutcome, DeliveryError> {
        self.webhook.post(payload).await
    }

    /// Email first, then webhook. Only the email can fail the dispatch.
    pub async fn deliver(&self, composed: &Composed) -> Result<DeliveryReport, TransportError> {
        self.send_email(&composed.email).await?;
        tracing::info!(
            to = %composed.email.to,
            cc = ?composed.email.cc,
            attachments = composed.email.attachments.len(),
            "Requisition email sent"
        );

        let webhook = match self.post_webhook(&composed.webhook).await {
            Ok(WebhookOutcome::Delivered) => {
                tracing::info!("Webhook notification delivered");
                WebhookStatus::Delivered
            }
            Ok(WebhookOutcome::Skipped) => {
                tracing::debug!("Webhook not configured, skipping notification");
                WebhookStatus::Skipped
            }
            Err(e) => {
                tracing::warn!(error = %e, "Webhook notification failed");
                WebhookStatus::Failed(e.to_string())
            }
        };
        metrics::record_webhook(&webhook);

        Ok(DeliveryReport { webhook })
    }
}
