//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate mail addresses and relay coordinates
//! - Validate webhook endpoint URL when one is configured
//! - Validate value ranges (body limit > 0, UTC offset)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use lettre::message::Mailbox;

use crate::config::schema::AppConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// Human readable description.
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

const MAX_UTC_OFFSET_MINUTES: u32 = 18 * 60;

/// Validate a loaded configuration, collecting every problem.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::new("listener.bind_address", "must not be empty"));
    }

    let mail = &config.mail;
    if mail.host.trim().is_empty() {
        errors.push(ValidationError::new("mail.host", "must not be empty"));
    }
    if mail.port == 0 {
        errors.push(ValidationError::new("mail.port", "must be a valid port"));
    }
    if let Err(e) = mail.from_address.parse::<Mailbox>() {
        errors.push(ValidationError::new(
            "mail.from_address",
            format!("invalid address '{}': {}", mail.from_address, e),
        ));
    }
    if let Err(e) = mail.to_address.parse::<Mailbox>() {
        errors.push(ValidationError::new(
            "mail.to_address",
            format!("invalid address '{}': {}", mail.to_address, e),
        ));
    }
    if !mail.username.is_empty() && mail.password.is_empty() {
        errors.push(ValidationError::new(
            "mail.password",
            "must be set when a username is configured",
        ));
    }

    if config.webhook.enabled() {
        let raw = config.webhook.url.as_deref().unwrap_or_default();
        match url::Url::parse(raw.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::new(
                "webhook.url",
                format!("unsupported scheme '{}'", url.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new(
                "webhook.url",
                format!("invalid URL: {}", e),
            )),
        }
    }
    if config.webhook.timeout_secs == Some(0) {
        errors.push(ValidationError::new("webhook.timeout_secs", "must be > 0 when set"));
    }

    if config.timeouts.request_secs == Some(0) {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0 when set"));
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::new("limits.max_body_bytes", "must be > 0"));
    }

    if config.composer.utc_offset_minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES {
        errors.push(ValidationError::new(
            "composer.utc_offset_minutes",
            "must be within ±18 hours",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
