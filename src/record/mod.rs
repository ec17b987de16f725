//! Dynamic records.
//!
//! API responses have no fixed schema on the client side, so they decode into
//! a [`Record`] tree. Outbound bodies are built the same way. Accessors return
//! [`RecordError`] on a kind mismatch instead of inventing attributes.

pub mod value;

pub use value::{Record, RecordError, RecordKind};
