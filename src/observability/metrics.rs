//! Metrics collection.
//!
//! # Metrics
//! - `eureka_client_requests_total` (counter): outbound requests by endpoint, method, status
//! - `eureka_client_request_duration_seconds` (histogram): latency per endpoint
//! - `eureka_client_retries_total` (counter): connection-level retries per endpoint
//! - `eureka_client_session_events_total` (counter): open/close/failed-open events
//!
//! Recorded through the `metrics` facade; the host application decides
//! whether and where to export them.

use metrics::{counter, histogram};
use std::time::Instant;

/// Record a completed request. `status` is 0 when no response was received.
pub fn record_request(endpoint: &str, method: &str, status: u16, start: Instant) {
    let duration = start.elapsed().as_secs_f64();
    let status = status.to_string();

    counter!(
        "eureka_client_requests_total",
        "endpoint" => endpoint.to_string(),
        "method" => method.to_string(),
        "status" => status
    )
    .increment(1);

    histogram!(
        "eureka_client_request_duration_seconds",
        "endpoint" => endpoint.to_string()
    )
    .record(duration);
}

/// Record a connection-level retry.
pub fn record_retry(endpoint: &str) {
    counter!("eureka_client_retries_total", "endpoint" => endpoint.to_string()).increment(1);
}

/// Record a session lifecycle event ("opened", "open_failed", "closed").
pub fn record_session_event(event: &'static str) {
    counter!("eureka_client_session_events_total", "event" => event).increment(1);
}
