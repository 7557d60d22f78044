use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::auth::claims::Claims;

#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Encoding error: {detail}")]
    Encoding { detail: String },
    #[error("Invalid token signature")]
    InvalidSignature,
    /// The signature checked out but the token is past its lifetime. The
    /// decoded claims ride along so callers can offer a refresh path.
    #[error("Token expired")]
    Expired { claims: Box<Claims> },
    #[error("No authentication data")]
    NoAuthenticationData,
    #[error("Session has not been reconciled")]
    NotReconciled,
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl SessionError {
    /// Stable error code for this variant
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::Encoding { .. } => "ENCODING_ERROR",
            SessionError::InvalidSignature => "INVALID_SIGNATURE",
            SessionError::Expired { .. } => "TOKEN_EXPIRED",
            SessionError::NoAuthenticationData => "NO_AUTHENTICATION_DATA",
            SessionError::NotReconciled => "NOT_RECONCILED",
            SessionError::Config { .. } => "CONFIG_ERROR",
        }
    }

    fn detail(&self) -> String {
        match self {
            SessionError::Encoding { detail } => detail.clone(),
            SessionError::InvalidSignature => "Invalid token".to_string(),
            SessionError::Expired { .. } => "Token expired".to_string(),
            SessionError::NoAuthenticationData => "Authentication required".to_string(),
            SessionError::NotReconciled => "Invalid session data".to_string(),
            SessionError::Config { detail } => detail.clone(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            SessionError::Encoding { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            SessionError::InvalidSignature => StatusCode::UNAUTHORIZED,
            SessionError::Expired { .. } => StatusCode::UNAUTHORIZED,
            SessionError::NoAuthenticationData => StatusCode::UNAUTHORIZED,
            SessionError::NotReconciled => StatusCode::UNAUTHORIZED,
            SessionError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn encoding(detail: impl Into<String>) -> Self {
        Self::Encoding {
            detail: detail.into(),
        }
    }

    pub fn invalid_signature() -> Self {
        Self::InvalidSignature
    }

    pub fn expired(claims: Claims) -> Self {
        Self::Expired {
            claims: Box::new(claims),
        }
    }

    pub fn no_authentication_data() -> Self {
        Self::NoAuthenticationData
    }

    pub fn not_reconciled() -> Self {
        Self::NotReconciled
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, SessionError::Expired { .. })
    }

    /// Claims recovered from an expired token, if this is an expiry error.
    pub fn expired_claims(&self) -> Option<&Claims> {
        match self {
            SessionError::Expired { claims } => Some(claims),
            _ => None,
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        SessionError::encoding(format!("failed to serialize extension payload: {e}"))
    }
}

impl ResponseError for SessionError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();

        let problem_details = ProblemDetails {
            type_: format!("https://claims-session.dev/errors/{code}"),
            title: Self::humanize_code(code),
            status: status.as_u16(),
            detail: self.detail(),
            code: code.to_string(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .json(problem_details)
    }
}
