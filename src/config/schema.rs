//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// CAS server endpoint.
    pub cas: CasConfig,

    /// Downstream API endpoint.
    pub api: ApiConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Connection-level retry configuration.
    pub retries: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ClientConfig {
    /// Set the CAS server URL.
    pub fn with_cas_url(mut self, url: impl Into<String>) -> Self {
        self.cas.url = url.into();
        self
    }

    /// Set the downstream API URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api.url = url.into();
        self
    }

    /// Toggle certificate verification for the CAS and API endpoints.
    pub fn with_cert_verification(mut self, verify_cas: bool, verify_api: bool) -> Self {
        self.cas.verify_cert = verify_cas;
        self.api.verify_cert = verify_api;
        self
    }

    /// Set the per-request timeout in seconds.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeouts.request_secs = secs;
        self
    }

    /// Set the maximum number of connection-level retries.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.retries.max_retries = retries;
        self
    }

    /// Select which job body variant the API expects.
    pub fn with_job_schema(mut self, schema: JobSchema) -> Self {
        self.api.job_schema = schema;
        self
    }
}

/// CAS server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CasConfig {
    /// Base URL of the CAS server (e.g., "https://localhost:8443/cas-server").
    pub url: String,

    /// Verify the CAS server's TLS certificate.
    pub verify_cert: bool,
}

impl Default for CasConfig {
    fn default() -> Self {
        Self {
            url: "https://localhost:8443/cas-server".to_string(),
            verify_cert: true,
        }
    }
}

/// Downstream API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the API (e.g., "https://localhost:8443/eureka-webapp").
    pub url: String,

    /// Verify the API server's TLS certificate.
    pub verify_cert: bool,

    /// Job body variant the server accepts.
    pub job_schema: JobSchema,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "https://localhost:8443/eureka-webapp".to_string(),
            verify_cert: true,
            job_schema: JobSchema::default(),
        }
    }
}

/// Job body variants accepted by different server versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSchema {
    /// Emits a nullable `jobMode` string.
    #[default]
    JobMode,
    /// Emits an `updateData` boolean.
    UpdateData,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Connect timeout (DNS, TCP connect and TLS handshake) in seconds.
    pub connect_secs: u64,
}

impl TimeoutConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    /// Bound on one connection attempt, never longer than the request timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_secs.min(self.request_secs))
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 60,
            connect_secs: 10,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of connection-level retries after the first attempt.
    pub max_retries: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
