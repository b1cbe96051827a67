//! Email channel: SMTP relay through lettre.

use async_trait::async_trait;
use lettre::address::AddressError;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::compose::EmailMessage;
use crate::config::{MailConfig, MailSecurity};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Errors from building or relaying an email. Always fatal to the request.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid email address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: AddressError,
    },

    #[error("Invalid attachment content type '{0}'")]
    ContentType(String),

    #[error("Failed to build email: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("Mail relay error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Relay refused the message for a reason reported as text.
    #[error("Mail relay rejected message: {0}")]
    Rejected(String),
}

/// Something that can deliver a composed email.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver the message. Returns only after the relay accepted it.
    async fn send(&self, message: &EmailMessage) -> Result<(), TransportError>;
}

/// Mailer backed by an async SMTP connection pool.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Create a mailer for the configured relay. No connection is opened yet.
    pub fn from_config(config: &MailConfig) -> Result<Self, TransportError> {
        let builder = match config.security() {
            MailSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?,
            MailSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            }
            MailSecurity::Plain => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            }
        };

        let mut builder = builder.port(config.port);
        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        tracing::info!(
            host = %config.host,
            port = config.port,
            security = ?config.security(),
            "SMTP transport configured"
        );

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), TransportError> {
        let email = build_message(message)?;
        let response = self.transport.send(email).await?;
        tracing::debug!(code = %response.code(), "Mail relay accepted message");
        Ok(())
    }
}

fn parse_mailbox(raw: &str) -> Result<Mailbox, TransportError> {
    raw.trim().parse().map_err(|source| TransportError::Address {
        address: raw.to_string(),
        source,
    })
}

/// Turn a composed email into a MIME message: HTML part plus attachments.
pub fn build_message(message: &EmailMessage) -> Result<Message, TransportError> {
    // A configured display name wins over the default sender name.
    let mut from = parse_mailbox(&message.from)?;
    if from.name.is_none() {
        from.name = Some(message.sender_name.clone());
    }

    let mut builder = Message::builder()
        .from(from)
        .to(parse_mailbox(&message.to)?)
        .subject(message.subject.clone());
    if let Some(cc) = &message.cc {
        builder = builder.cc(parse_mailbox(cc)?);
    }

    let mut body = MultiPart::mixed().singlepart(SinglePart::html(message.html_body.clone()));
    for attachment in &message.attachments {
        let content_type = ContentType::parse(&attachment.content_type)
            .or_else(|_| ContentType::parse(FALLBACK_CONTENT_TYPE))
            .map_err(|_| TransportError::ContentType(attachment.content_type.clone()))?;
        body = body.singlepart(
            Attachment::new(attachment.filename.clone())
                .body(attachment.content.clone(), content_type),
        );
    }

    Ok(builder.multipart(body)?)
}
