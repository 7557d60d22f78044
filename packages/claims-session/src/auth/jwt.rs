use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::claims::{Claims, EXPIRY_CLAIM};
use crate::error::SessionError;
use crate::state::security_config::SecurityConfig;

/// Mint a signed token for `extension`, expiring `token_lifetime` after `now`.
pub fn sign_claims<E>(
    extension: &E,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, SessionError>
where
    E: Serialize + ?Sized,
{
    let claims = issue_claims(extension, now, security)?;
    encode_claims(&claims, security)
}

/// Build the claims a token issued at `now` would carry.
pub fn issue_claims<E>(
    extension: &E,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<Claims, SessionError>
where
    E: Serialize + ?Sized,
{
    let lifetime = i64::try_from(security.token_lifetime.as_secs()).unwrap_or(i64::MAX);
    let exp = unix_seconds(now).saturating_add(lifetime);
    Claims::new(extension, exp)
}

/// Sign already-built claims.
pub fn encode_claims(claims: &Claims, security: &SecurityConfig) -> Result<String, SessionError> {
    encode(
        &Header::new(security.algorithm),
        claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| SessionError::encoding(format!("Failed to encode JWT: {e}")))
}

/// Verify a token and return its claims.
///
/// Errors:
/// - Bad signature, malformed token, missing `exp` → `SessionError::InvalidSignature`
/// - Valid signature but past expiry → `SessionError::Expired` (claims attached)
pub fn verify_claims(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<Claims, SessionError> {
    // Expiry is checked below on the decoded claims so an expired token can
    // still hand them back.
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.set_required_spec_claims(&[EXPIRY_CLAIM]);

    let raw = decode::<Map<String, Value>>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        let reason = match e.kind() {
            ErrorKind::InvalidSignature => "invalid_signature",
            ErrorKind::InvalidAlgorithm => "invalid_algorithm",
            ErrorKind::MissingRequiredClaim(_) => "missing_claim",
            _ => "invalid_token",
        };
        debug!(reason, "Token failed verification");
        SessionError::invalid_signature()
    })?;

    let claims = Claims::from_wire(raw).ok_or_else(|| {
        debug!(reason = "invalid_exp", "Token failed verification");
        SessionError::invalid_signature()
    })?;

    let leeway = i64::try_from(security.leeway.as_secs()).unwrap_or(i64::MAX);
    if claims.exp.saturating_add(leeway) < unix_seconds(now) {
        debug!(exp = claims.exp, "Token expired");
        return Err(SessionError::expired(claims));
    }

    Ok(claims)
}

/// Seconds since the epoch; instants before the epoch come out negative.
pub(crate) fn unix_seconds(at: SystemTime) -> i64 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(since) => i64::try_from(since.as_secs()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_secs())
            .map(|secs| -secs)
            .unwrap_or(i64::MIN),
    }
}
