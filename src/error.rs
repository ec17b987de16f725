//! Client error taxonomy.
//!
//! Every fallible operation in the crate returns [`ClientError`]. Only the
//! best-effort teardown steps inside `Session::close` swallow errors, and
//! those are logged instead.

use thiserror::Error;

use crate::config::loader::ConfigError;
use crate::record::RecordError;

/// Errors surfaced by the CAS client, the transport and the resource clients.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, TLS, DNS or timeout failure after retries were exhausted.
    #[error("Transport error for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// A CAS ticket operation (or the downstream ticket handshake) was rejected.
    #[error("Authentication failed with status {status}: {body}")]
    Authentication { status: u16, body: String },

    /// A proxied-resource call returned a non-success status.
    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The server broke the expected contract (e.g. no `Location` on a 2xx create).
    #[error("Protocol violation: {0}")]
    Protocol(String),

    /// A response body that should have been JSON could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// An operation was invoked in a state that does not allow it.
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// Configuration could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A dynamic record accessor was used on the wrong kind of value.
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl ClientError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Authentication { status, .. } | ClientError::Api { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Response body carried by the error, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            ClientError::Authentication { body, .. } | ClientError::Api { body, .. } => {
                Some(body)
            }
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
