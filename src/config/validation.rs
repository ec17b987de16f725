//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check both endpoint URLs parse and use http(s)
//! - Validate value ranges (timeouts > 0, backoff bounds ordered)
//!
//! Validation is a pure function returning every error, not just the first.

use thiserror::Error;
use url::Url;

use crate::config::schema::ClientConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field}: unsupported scheme '{scheme}' (expected http or https)")]
    UnsupportedScheme { field: &'static str, scheme: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("timeouts.connect_secs must be greater than zero")]
    ZeroConnectTimeout,

    #[error("retries.base_delay_ms ({base}) exceeds retries.max_delay_ms ({max})")]
    BackoffBounds { base: u64, max: u64 },

    #[error("observability.log_level: unknown level '{0}'")]
    UnknownLogLevel(String),
}

/// Validate a configuration, collecting all errors.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url("cas.url", &config.cas.url, &mut errors);
    check_url("api.url", &config.api.url, &mut errors);

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroConnectTimeout);
    }

    if config.retries.base_delay_ms > config.retries.max_delay_ms {
        errors.push(ValidationError::BackoffBounds {
            base: config.retries.base_delay_ms,
            max: config.retries.max_delay_ms,
        });
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::UnsupportedScheme {
                    field,
                    scheme: url.scheme().to_string(),
                });
            }
        }
        Err(e) => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}
