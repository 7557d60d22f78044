//! Cookie transport for session tokens.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use actix_web::HttpRequest;

use crate::error::SessionError;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Cookie lifetime hint. Longer than the default token lifetime so the
/// token's own expiry stays authoritative.
pub const COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 48;

const COOKIE_PATH: &str = "/";

/// Cookie carrying `token` back to the client.
pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build(ACCESS_TOKEN_COOKIE, token.to_owned())
        .path(COOKIE_PATH)
        .max_age(CookieDuration::seconds(COOKIE_MAX_AGE_SECS))
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// Cookie that clears the session on the client.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(ACCESS_TOKEN_COOKIE, "")
        .path(COOKIE_PATH)
        .finish();
    cookie.make_removal();
    cookie
}

/// Read the session token from the `access_token` cookie, falling back to an
/// `Authorization: Bearer` header.
pub fn token_from_request(req: &HttpRequest) -> Result<String, SessionError> {
    if let Some(cookie) = req.cookie(ACCESS_TOKEN_COOKIE) {
        if !cookie.value().is_empty() {
            return Ok(cookie.value().to_string());
        }
    }

    bearer_token(req).ok_or_else(SessionError::no_authentication_data)
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let auth_str = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;

    let parts: Vec<&str> = auth_str.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return None;
    }

    Some(parts[1].to_string())
}
