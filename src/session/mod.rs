//! Session orchestration.
//!
//! # Data Flow
//! ```text
//! Session::open(config, credentials)
//!     → validate config, build one transport per endpoint
//!     → CasAuthenticator::login                    (TGT)
//!     → DownstreamSession::establish               (service ticket → cookie)
//!     → users() / phenotypes() / concepts() / jobs()  (no I/O)
//! Session::close
//!     → DownstreamSession::destroy   (best-effort)
//!     → CasAuthenticator::logout     (best-effort)
//! ```
//!
//! # Design Decisions
//! - A failed open never leaks a TGT: it logs out before returning the error
//! - `close` is async, so dropping an open session only warns
//! - [`with_session`] guarantees `close` runs on both success and failure

pub mod handle;
pub mod scoped;

pub use handle::Session;
pub use scoped::with_session;
