use std::env;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::error::SessionError;

/// Lifetime of every issued token unless configured otherwise.
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Signing key used until the process installs its own.
pub const DEFAULT_SIGNING_KEY: &[u8] = b"secret";

pub const ENV_JWT_SECRET: &str = "SESSION_JWT_SECRET";
pub const ENV_TOKEN_TTL_SECS: &str = "SESSION_TOKEN_TTL_SECS";

/// Configuration for session token signing and verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
    /// How long a freshly signed token stays valid
    pub token_lifetime: Duration,
    /// Grace period applied to the expiry check
    pub leeway: Duration,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_lifetime: DEFAULT_TOKEN_LIFETIME,
            leeway: Duration::ZERO,
        }
    }

    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Build the configuration from `SESSION_JWT_SECRET` and the optional
    /// `SESSION_TOKEN_TTL_SECS`.
    pub fn from_env() -> Result<Self, SessionError> {
        let secret = env::var(ENV_JWT_SECRET)
            .map_err(|_| SessionError::config(format!("{ENV_JWT_SECRET} must be set")))?;
        if secret.is_empty() {
            return Err(SessionError::config(format!(
                "{ENV_JWT_SECRET} must not be empty"
            )));
        }

        let config = Self::new(secret.into_bytes());
        match env::var(ENV_TOKEN_TTL_SECS) {
            Ok(raw) => {
                let lifetime = parse_lifetime(&raw)?;
                Ok(config.with_token_lifetime(lifetime))
            }
            Err(_) => Ok(config),
        }
    }

    pub fn uses_default_key(&self) -> bool {
        self.jwt_secret == DEFAULT_SIGNING_KEY
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNING_KEY.to_vec())
    }
}

fn parse_lifetime(raw: &str) -> Result<Duration, SessionError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(SessionError::config(format!(
            "{ENV_TOKEN_TTL_SECS} must be a positive number of seconds, got {raw:?}"
        ))),
    }
}
