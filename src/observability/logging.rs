//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber from configuration
//! - Let `RUST_LOG` override the configured level
//!
//! Credentials, TGTs and service tickets are never passed to log macros.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Install the global tracing subscriber.
///
/// Returns `false` when a subscriber was already installed (e.g. by the host
/// application), in which case the existing one is left in place.
pub fn init_logging(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(&config.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.is_ok()
}

fn default_filter(level: &str) -> String {
    format!("eureka_client={},eureka={}", level, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("debug"), "eureka_client=debug,eureka=debug");
    }

    #[test]
    fn test_second_init_is_harmless() {
        let config = ObservabilityConfig::default();
        let _ = init_logging(&config);
        assert!(!init_logging(&config));
    }
}
