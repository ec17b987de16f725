//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or builder setters
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → read once by Session::open to build transports
//! ```
//!
//! # Design Decisions
//! - Config is immutable once a Session is open
//! - All fields have defaults to allow minimal configs
//! - Credentials are never part of the config

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ApiConfig, CasConfig, ClientConfig, JobSchema, ObservabilityConfig, RetryConfig,
    TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
