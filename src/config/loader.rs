//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{AppConfig, MailSecurity};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, message: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, message } => write!(f, "Invalid {}: {}", var, message),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse configuration from a TOML file without validating it.
pub fn read_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = read_config_file(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Build the startup configuration.
///
/// Starts from the TOML file when a path is given (defaults otherwise),
/// applies process environment overrides, then validates the result.
pub fn load_startup_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay environment variables onto a configuration.
///
/// `lookup` resolves a variable name to its value; injected so tests do not
/// have to mutate the process environment.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("BIND_ADDRESS") {
        config.listener.bind_address = v;
    }
    if let Some(v) = lookup("EMAIL_HOST") {
        config.mail.host = v;
    }
    if let Some(v) = lookup("EMAIL_PORT") {
        config.mail.port = v.trim().parse::<u16>().map_err(|e| ConfigError::Env {
            var: "EMAIL_PORT",
            message: format!("{}", e),
        })?;
    }
    if let Some(v) = lookup("EMAIL_SECURITY") {
        let security: MailSecurity = v
            .parse()
            .map_err(|message| ConfigError::Env { var: "EMAIL_SECURITY", message })?;
        config.mail.security = Some(security);
    }
    if let Some(v) = lookup("EMAIL_USER") {
        config.mail.username = v;
    }
    if let Some(v) = lookup("EMAIL_PASS") {
        config.mail.password = v;
    }
    if let Some(v) = lookup("EMAIL_FROM") {
        config.mail.from_address = v;
    }
    if let Some(v) = lookup("EMAIL_TO") {
        config.mail.to_address = v;
    }
    if let Some(v) = lookup("DISCORD_WEBHOOK_URL") {
        config.webhook.url = if v.trim().is_empty() { None } else { Some(v) };
    }
    if let Some(v) = lookup("LOG_LEVEL") {
        config.observability.log_level = v;
    }
    Ok(())
}
