//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the requisition service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Mail relay used for the email channel.
    pub mail: MailConfig,

    /// Chat webhook used for the notification channel.
    pub webhook: WebhookConfig,

    /// Rendering settings for composed messages.
    pub composer: ComposerConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailSecurity {
    /// Implicit TLS from the first byte (usually port 465).
    Tls,
    /// Plain connection upgraded with STARTTLS (usually port 587).
    StartTls,
    /// No encryption. Only for local relays.
    Plain,
}

impl MailSecurity {
    /// Conventional mode for a port when none is configured.
    pub fn for_port(port: u16) -> Self {
        if port == 465 {
            MailSecurity::Tls
        } else {
            MailSecurity::StartTls
        }
    }
}

impl std::str::FromStr for MailSecurity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tls" => Ok(MailSecurity::Tls),
            "starttls" => Ok(MailSecurity::StartTls),
            "plain" => Ok(MailSecurity::Plain),
            other => Err(format!("unknown mail security mode '{}'", other)),
        }
    }
}

/// Mail relay configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MailConfig {
    /// Relay host name.
    pub host: String,

    /// Relay port.
    pub port: u16,

    /// Connection security. Derived from the port when unset.
    pub security: Option<MailSecurity>,

    /// SMTP username. Empty disables authentication.
    pub username: String,

    /// SMTP password.
    pub password: String,

    /// Sender address.
    pub from_address: String,

    /// Fixed recipient of every requisition.
    pub to_address: String,
}

impl MailConfig {
    /// Effective security mode.
    pub fn security(&self) -> MailSecurity {
        self.security.unwrap_or_else(|| MailSecurity::for_port(self.port))
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            security: None,
            username: String::new(),
            password: String::new(),
            from_address: "requisicoes@example.com".to_string(),
            to_address: "almoxarifado@example.com".to_string(),
        }
    }
}

/// Chat webhook configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WebhookConfig {
    /// Endpoint URL. `None` disables the channel.
    pub url: Option<String>,

    /// Optional per-call timeout in seconds. Unset means wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl WebhookConfig {
    /// Whether a webhook endpoint is configured.
    pub fn enabled(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.trim().is_empty())
    }
}

/// Message rendering configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Offset from UTC, in minutes, used for the submission date in emails.
    pub utc_offset_minutes: i32,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            // Brasília time
            utc_offset_minutes: -180,
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum multipart body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed per request in seconds. Unset means no limit.
    pub request_secs: Option<u64>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
