//! CAS authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Credentials
//!     → authenticator.rs: POST {cas}/v1/tickets/          → TGT (from Location)
//!     → authenticator.rs: POST {cas}/v1/tickets/{TGT}     → service ticket (body)
//!     → authenticator.rs: DELETE {cas}/v1/tickets/{TGT}   → logged out
//! ```
//!
//! # Security Constraints
//! - Passwords and tickets never appear in logs or `Debug` output
//! - A service ticket is minted per target URL and never reused

pub mod authenticator;
pub mod types;

pub use authenticator::CasAuthenticator;
pub use types::{CasState, Credentials, ServiceTicket, TicketGrantingTicket};
