//! Downstream API access.
//!
//! # Data Flow
//! ```text
//! session.rs: GET {api}/protected/get-session?ticket=ST-…  → session cookie
//! client.rs:  GET  {api}/proxy-resource{endpoint}[id]       → Record
//!             POST {api}/proxy-resource{endpoint} (JSON)    → id from Location
//! resources.rs: Users / Phenotypes / Concepts / Jobs, each a ResourceClient
//!               bound to one path prefix
//! session.rs: GET {api}/destroy-session                     (best-effort)
//! ```
//!
//! # Design Decisions
//! - Resource collections hold shared handles only; creating one does no I/O
//! - Non-2xx from a resource call is `ClientError::Api`; from the session
//!   handshake it is `ClientError::Authentication`

pub mod client;
pub mod job;
pub mod resources;
pub mod session;

pub use client::{parse_location_id, ResourceClient};
pub use job::{DateSide, Job};
pub use resources::{Concepts, Jobs, Phenotypes, Users};
pub use session::DownstreamSession;
