//! Unified test logging initialization for integration tests
//!
//! Integration tests can't reach the crate's test-only bootstrap, so each
//! test binary wires the shared initializer in through a constructor.
//!
//! ```bash
//! # Use TEST_LOG (preferred)
//! TEST_LOG=debug cargo test -p claims-session
//!
//! # JSON lines, same as the demo server
//! TEST_LOG=debug TEST_LOG_FORMAT=json cargo test -p claims-session
//! ```

/// Initialize logging once per integration test binary.
#[ctor::ctor]
fn _auto_init_for_integration_tests() {
    session_test_support::test_logging::init();
}
