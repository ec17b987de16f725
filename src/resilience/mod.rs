//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to CAS or API:
//!     → reqwest client timeout (every call has a deadline)
//!     → On send failure: retries.rs (connection-level failures only)
//!     → backoff.rs (exponential delay with jitter before next attempt)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - Retries never apply to HTTP responses, whatever their status

pub mod backoff;
pub mod retries;

pub use backoff::calculate_backoff;
pub use retries::{is_retryable, FailureKind, RetryPolicy};
