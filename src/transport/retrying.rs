//! reqwest-backed transport with a fixed timeout and connection-level retries.
//!
//! # Responsibilities
//! - Apply the configured timeouts to every call
//! - Retry DNS/connect/TLS failures with jittered exponential backoff
//! - Keep a cookie jar so server-issued session cookies ride along
//! - Tag each logical request with an x-request-id for correlation

use async_trait::async_trait;
use reqwest::Client;
use std::error::Error as StdError;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::config::{ClientConfig, RetryConfig};
use crate::error::{ClientError, Result};
use crate::observability::metrics;
use crate::resilience::backoff::backoff_for;
use crate::resilience::retries::{FailureKind, RetryPolicy};
use crate::transport::{HttpRequest, HttpResponse, RequestBody, Transport};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Settings for one logical endpoint (CAS or API).
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Label used in logs and metrics.
    pub endpoint: &'static str,
    /// Total time for one attempt, connect through body read.
    pub timeout: Duration,
    /// Bound on the DNS, TCP connect and TLS handshake phase of one attempt.
    /// It runs inside `timeout`, so it should be the shorter of the two. A
    /// connect that exceeds it fails as a connect error and is retried; one
    /// cut off by `timeout` instead is classified as a timeout and is not.
    pub connect_timeout: Duration,
    pub verify_cert: bool,
    pub retry: RetryConfig,
}

impl TransportConfig {
    /// Transport settings for the CAS server.
    pub fn cas(config: &ClientConfig) -> Self {
        Self {
            endpoint: "cas",
            timeout: config.timeouts.request_timeout(),
            connect_timeout: config.timeouts.connect_timeout(),
            verify_cert: config.cas.verify_cert,
            retry: config.retries.clone(),
        }
    }

    /// Transport settings for the downstream API.
    pub fn api(config: &ClientConfig) -> Self {
        Self {
            endpoint: "api",
            timeout: config.timeouts.request_timeout(),
            connect_timeout: config.timeouts.connect_timeout(),
            verify_cert: config.api.verify_cert,
            retry: config.retries.clone(),
        }
    }
}

/// HTTP transport with timeout and bounded connection-level retry.
pub struct RetryingTransport {
    client: Client,
    config: TransportConfig,
}

impl RetryingTransport {
    /// Build a transport for one endpoint.
    pub fn new(config: TransportConfig) -> Result<Self> {
        if !config.verify_cert {
            tracing::warn!(
                endpoint = config.endpoint,
                "TLS certificate verification disabled"
            );
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .danger_accept_invalid_certs(!config.verify_cert)
            .cookie_store(true)
            .user_agent(concat!("eureka-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Transport {
                url: config.endpoint.to_string(),
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn build(&self, request: &HttpRequest, request_id: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone())
            .header(REQUEST_ID_HEADER, request_id);

        match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(fields) => builder.form(fields),
            RequestBody::Json(json) => builder.body(json.clone()),
        }
    }
}

#[async_trait]
impl Transport for RetryingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let endpoint = self.config.endpoint;
        let request_id = Uuid::new_v4().to_string();
        let method = request.method.as_str().to_string();
        let start = Instant::now();
        let mut policy = RetryPolicy::new(self.config.retry.max_retries);

        loop {
            let attempt = policy.begin_attempt();

            match self.build(&request, &request_id).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    let headers = response.headers().clone();
                    let body = response
                        .text()
                        .await
                        .map_err(|e| transport_error(&request.url, &e))?;

                    metrics::record_request(endpoint, &method, status, start);
                    tracing::debug!(
                        request_id = %request_id,
                        endpoint,
                        method = %method,
                        status,
                        attempt,
                        "Request completed"
                    );
                    return Ok(HttpResponse {
                        status,
                        headers,
                        body,
                    });
                }
                Err(e) => {
                    let kind = FailureKind::of(&e);
                    if policy.should_retry(kind) {
                        let delay = backoff_for(&self.config.retry, attempt);
                        tracing::warn!(
                            request_id = %request_id,
                            endpoint,
                            attempt,
                            delay = ?delay,
                            error = %e,
                            "Connection failed, retrying"
                        );
                        metrics::record_retry(endpoint);
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    metrics::record_request(endpoint, &method, 0, start);
                    tracing::error!(
                        request_id = %request_id,
                        endpoint,
                        method = %method,
                        attempt,
                        kind = ?kind,
                        error = %e,
                        "Request failed"
                    );
                    return Err(transport_error(&request.url, &e));
                }
            }
        }
    }
}

impl std::fmt::Debug for RetryingTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryingTransport")
            .field("endpoint", &self.config.endpoint)
            .field("timeout", &self.config.timeout)
            .field("connect_timeout", &self.config.connect_timeout)
            .field("verify_cert", &self.config.verify_cert)
            .field("max_retries", &self.config.retry.max_retries)
            .finish()
    }
}

fn transport_error(url: &str, err: &reqwest::Error) -> ClientError {
    // reqwest's top-level message is generic; the root cause is in the chain.
    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    ClientError::Transport {
        url: url.to_string(),
        reason,
    }
}
