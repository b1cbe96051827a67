//! Message composition.
//!
//! # Data Flow
//! ```text
//! RequisitionRecord
//!     → email.rs (subject, HTML body with item tables, cc, attachment)
//!     → webhook.rs (item digest, embed fields, timestamp)
//!     → Composed { email, webhook }
//! ```
//!
//! # Design Decisions
//! - Composition is pure: the submission instant is an input, not a clock read
//! - Empty item lists render nothing, not an empty table
//! - The cc header and footnote share one rule (`RequisitionRecord::cc_recipient`)

pub mod email;
pub mod html;
pub mod webhook;

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::config::{ComposerConfig, MailConfig};
use crate::requisition::RequisitionRecord;

pub use email::EmailMessage;
pub use webhook::{EmbedField, WebhookPayload};

/// Both renderings of one requisition.
#[derive(Debug, Clone)]
pub struct Composed {
    pub email: EmailMessage,
    pub webhook: WebhookPayload,
}

/// Turns records into email messages and webhook payloads.
#[derive(Debug, Clone)]
pub struct Composer {
    from: String,
    to: String,
    offset: FixedOffset,
}

impl Composer {
    /// Create a composer for the configured sender and recipient.
    pub fn new(mail: &MailConfig, config: &ComposerConfig) -> Self {
        let offset = FixedOffset::east_opt(config.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix());
        Self {
            from: mail.from_address.clone(),
            to: mail.to_address.clone(),
            offset,
        }
    }

    /// Compose the email and the webhook payload for a requisition.
    pub fn compose(&self, record: &RequisitionRecord, submitted_at: DateTime<Utc>) -> Composed {
        let submitted = email::format_date(submitted_at, self.offset);

        let email = EmailMessage {
            sender_name: email::SENDER_NAME.to_string(),
            from: self.from.clone(),
            to: self.to.clone(),
            cc: record.cc_recipient().map(str::to_string),
            subject: email::subject(&record.department),
            html_body: email::render_body(record, &submitted),
            attachments: record.attachment.iter().cloned().collect(),
        };

        Composed {
            email,
            webhook: webhook::build_payload(record, submitted_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requisition::{Attachment, StandardItem};
    use chrono::TimeZone;

    fn composer() -> Composer {
        Composer::new(&MailConfig::default(), &ComposerConfig::default())
    }

    fn record() -> RequisitionRecord {
        RequisitionRecord {
            requester: "Ana".into(),
            department: "TI".into(),
            note: None,
            cc_requested: true,
            cc_email: Some("ana@maglog.com.br".into()),
            standard_items: vec![StandardItem { name: "RIBBON".into(), quantity: 2 }],
            custom_items: Vec::new(),
            attachment: Some(Attachment {
                filename: "caixa.jpg".into(),
                content_type: "image/jpeg".into(),
                content: vec![1, 2, 3],
            }),
        }
    }

    #[test]
    fn test_compose_email() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 13, 0, 0).unwrap();
        let composed = composer().compose(&record(), at);
        let email = composed.email;

        assert_eq!(email.sender_name, "Requisição Almoxarifado");
        assert_eq!(email.from, "requisicoes@example.com");
        assert_eq!(email.to, "almoxarifado@example.com");
        assert_eq!(email.cc.as_deref(), Some("ana@maglog.com.br"));
        assert_eq!(email.subject, "Nova Requisição de Almoxarifado - Setor: TI");
        assert!(email.html_body.contains("19/10/2026 10:00:00"));
        assert_eq!(email.attachments.len(), 1);
        assert_eq!(composed.webhook.field("Foto anexada"), Some("caixa.jpg"));
        assert_eq!(composed.webhook.timestamp, at);
    }

    #[test]
    fn test_cc_requires_checkbox() {
        let mut r = record();
        r.cc_requested = false;
        let composed = composer().compose(&r, Utc::now());
        assert!(composed.email.cc.is_none());
        assert!(composed.webhook.field("Cópia para").is_none());
    }
}
