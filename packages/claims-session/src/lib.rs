#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Short-lived signed session tokens carrying caller-defined payloads.
//!
//! A payload is signed into an HS256 token with [`issue`]; [`verify`] checks
//! the token and reconciles the payload into whatever [`Shape`] the caller
//! asks for: the generic claims mapping, a record registered with
//! [`claims_record!`], or a value the caller already holds.
//!
//! ```
//! use claims_session::{claims_record, issue, verify, Payload, Shape};
//! use serde::Serialize;
//!
//! #[derive(Debug, Default, Clone, PartialEq, Serialize)]
//! struct User {
//!     id: String,
//!     name: String,
//!     age: i64,
//! }
//!
//! claims_record!(User { id, name, age });
//!
//! let token = issue(&User { id: "u1".into(), name: "Ann".into(), age: 30 }).unwrap();
//! let user = verify(&token, Shape::<User>::Record).unwrap();
//! assert_eq!(user.into_typed().map(|u| u.age), Some(30));
//! ```

pub mod auth;
pub mod error;
pub mod logging;
pub mod reconcile;
pub mod session;
pub mod state;
pub mod web;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use auth::claims::Claims;
pub use error::SessionError;
pub use reconcile::{reconcile, FromClaim, Reconcile};
pub use serde_json::{Map, Value};
pub use session::{
    issue, reconcile_claims, verify, verify_with, DefaultSession, Payload, Session, Shape,
};
pub use state::secret_store;
pub use state::security_config::SecurityConfig;
pub use web::{Authenticated, Identify};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
