//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! transport, cas, api, session produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms via the metrics facade)
//!
//! Each outbound request carries an x-request-id that appears in both.
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
