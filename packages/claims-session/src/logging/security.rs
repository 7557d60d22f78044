use tracing::{info, warn};

use crate::error::SessionError;
use crate::logging::pii::RedactedToken;

/// Log a rejected session token.
///
/// Expired tokens are an expected part of a session's life and are logged at
/// info; everything else is a security event.
pub fn token_rejected(err: &SessionError, path: &str, token: Option<&str>) {
    let token = token.map(RedactedToken);

    if err.is_expired() {
        info!(
            event = "SECURITY_TOKEN_EXPIRED",
            path,
            token = ?token,
            "Session token expired"
        );
        return;
    }

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        code = err.code(),
        path,
        token = ?token,
        "Session token rejected"
    );
}
