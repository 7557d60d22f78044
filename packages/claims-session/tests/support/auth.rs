//! Token helpers for tests

use std::time::{Duration, SystemTime};

use claims_session::auth::jwt::sign_claims;
use claims_session::SecurityConfig;
use serde::Serialize;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

/// Mint a fresh token for `payload`.
pub fn mint_test_token<E: Serialize>(payload: &E, sec: &SecurityConfig) -> String {
    sign_claims(payload, SystemTime::now(), sec).expect("should mint token successfully")
}

/// Mint a token whose lifetime ended an hour ago.
pub fn mint_expired_token<E: Serialize>(payload: &E, sec: &SecurityConfig) -> String {
    let past_time = SystemTime::now()
        .checked_sub(sec.token_lifetime + Duration::from_secs(3600))
        .unwrap();
    sign_claims(payload, past_time, sec).expect("should mint expired token successfully")
}

/// Full Authorization header value including the "Bearer " prefix.
pub fn bearer_header<E: Serialize>(payload: &E, sec: &SecurityConfig) -> String {
    format!("Bearer {}", mint_test_token(payload, sec))
}
