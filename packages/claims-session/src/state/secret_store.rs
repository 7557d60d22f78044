//! Process-wide signing configuration.
//!
//! The store is a configuration slot written once during startup and read by
//! every sign/verify call afterwards. Replacing the key does not revoke tokens
//! already issued; verification simply uses whatever key is current, so key
//! rotation has to be coordinated by the caller.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::info;

use super::security_config::SecurityConfig;

static STORE: Lazy<RwLock<Arc<SecurityConfig>>> =
    Lazy::new(|| RwLock::new(Arc::new(SecurityConfig::default())));

/// Install a complete security configuration for the process.
pub fn init(config: SecurityConfig) {
    info!(
        lifetime_secs = config.token_lifetime.as_secs(),
        default_key = config.uses_default_key(),
        "Session security configuration installed"
    );
    *STORE.write() = Arc::new(config);
}

/// Replace the process-wide signing key, keeping the other settings.
pub fn set_signing_key(key: impl Into<Vec<u8>>) {
    let mut slot = STORE.write();
    let mut next = SecurityConfig::clone(&slot);
    next.jwt_secret = key.into();
    *slot = Arc::new(next);
}

/// Replace the lifetime applied to newly signed tokens.
pub fn set_token_lifetime(lifetime: Duration) {
    let mut slot = STORE.write();
    let mut next = SecurityConfig::clone(&slot);
    next.token_lifetime = lifetime;
    *slot = Arc::new(next);
}

/// Snapshot of the current configuration.
pub fn current() -> Arc<SecurityConfig> {
    Arc::clone(&STORE.read())
}

pub fn current_key() -> Vec<u8> {
    current().jwt_secret.clone()
}

/// Restore the default configuration. Tests call this between cases.
pub fn reset() {
    *STORE.write() = Arc::new(SecurityConfig::default());
}
