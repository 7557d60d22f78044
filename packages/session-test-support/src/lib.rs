//! Session test support utilities
//!
//! Shared by the integration tests of the session crates: unified logging
//! initialization and assertions for problem+json error responses.

pub mod problem_details;
pub mod test_logging;
