//! Eureka Clinical API client.
//!
//! Authenticates against a CAS server with the REST ticket protocol, opens a
//! session on the downstream Eureka API, and exposes the resources that API
//! proxies as dynamic JSON [`Record`]s.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────────────┐
//!                 │                        SESSION                           │
//!                 │                                                          │
//!   Credentials   │  ┌───────────────┐  TGT / ST   ┌────────────────────┐    │
//!   ──────────────┼─▶│      cas      │────────────▶│   api::session     │    │
//!                 │  │ authenticator │             │ get/destroy-session│    │
//!                 │  └───────┬───────┘             └─────────┬──────────┘    │
//!                 │          │                               │ cookie        │
//!                 │          ▼                               ▼               │
//!                 │  ┌───────────────┐             ┌────────────────────┐    │
//!                 │  │   transport   │             │     transport      │    │
//!                 │  │  (cas, retry) │             │    (api, retry)    │    │
//!                 │  └───────┬───────┘             └─────────┬──────────┘    │
//!                 │          │                               ▲               │
//!                 │          │                     ┌─────────┴──────────┐    │
//!                 │          │                     │ api::resources     │◀───┼── users() / jobs() …
//!                 │          │                     │ Users Phenotypes   │    │
//!                 │          │                     │ Concepts Jobs      │────┼─▶ Record
//!                 │          │                     └────────────────────┘    │
//!                 │  ┌───────┴────────────────────────────────────────────┐  │
//!                 │  │               Cross-Cutting Concerns                │  │
//!                 │  │  config · error · observability · resilience        │  │
//!                 │  └────────────────────────────────────────────────────┘  │
//!                 └──────────────────────────────────────────────────────────┘
//! ```

// Protocol layers
pub mod api;
pub mod cas;
pub mod record;
pub mod session;
pub mod transport;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod observability;
pub mod resilience;

pub use api::{Concepts, DateSide, Job, Jobs, Phenotypes, Users};
pub use cas::Credentials;
pub use config::{ClientConfig, JobSchema};
pub use error::{ClientError, Result};
pub use record::Record;
pub use session::{with_session, Session};
