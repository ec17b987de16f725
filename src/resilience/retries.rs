//! Retry logic.
//!
//! # Responsibilities
//! - Decide whether a failed send may be retried (connection-level only)
//! - Track the attempt budget for one logical request
//!
//! # Design Decisions
//! - Only failures before a response exists are retryable (DNS, connect, TLS)
//! - Any HTTP status, 4xx and 5xx included, is returned to the caller as-is
//! - Timeouts after the request went out are not retried
//! - A connect that exceeds the connect timeout counts as a connect failure

/// Classification of a failed send, independent of the HTTP client in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// DNS resolution, TCP connect or TLS handshake failed.
    Connect,
    /// The request was sent but no complete response arrived in time.
    Timeout,
    /// Anything else (body read, redirect loop, builder error).
    Other,
}

impl FailureKind {
    /// Classify a `reqwest` error. A connect timeout reports both
    /// `is_connect()` and `is_timeout()`, so connect is checked first.
    pub fn of(err: &reqwest::Error) -> Self {
        if err.is_connect() {
            FailureKind::Connect
        } else if err.is_timeout() {
            FailureKind::Timeout
        } else {
            FailureKind::Other
        }
    }
}

/// Whether a failure of this kind may be retried.
pub fn is_retryable(kind: FailureKind) -> bool {
    matches!(kind, FailureKind::Connect)
}

/// Attempt accounting for a single logical request.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    attempts: u32,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            attempts: 0,
        }
    }

    /// Record the start of an attempt and return its 1-based number.
    pub fn begin_attempt(&mut self) -> u32 {
        self.attempts += 1;
        self.attempts
    }

    /// Whether another attempt may follow a failure of the given kind.
    pub fn should_retry(&self, kind: FailureKind) -> bool {
        is_retryable(kind) && self.attempts <= self.max_retries
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}
