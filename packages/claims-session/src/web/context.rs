//! Per-request storage of the verified session payload.

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::error::SessionError;

/// Session payload attached to a request by [`Identify`](super::Identify).
///
/// Use it as a handler argument to read the session without re-verifying
/// the token; a request without one is rejected with
/// `SessionError::NoAuthenticationData`.
#[derive(Debug, Clone, PartialEq)]
pub struct Authenticated<P>(pub P);

impl<P> Authenticated<P> {
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P> Deref for Authenticated<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.0
    }
}

/// Attach `payload` to the request's extensions.
pub fn attach<P: 'static>(req: &impl HttpMessage, payload: P) {
    req.extensions_mut().insert(Authenticated(payload));
}

/// Read the payload attached by [`attach`].
pub fn authenticated<P>(req: &impl HttpMessage) -> Result<P, SessionError>
where
    P: Clone + 'static,
{
    req.extensions()
        .get::<Authenticated<P>>()
        .map(|found| found.0.clone())
        .ok_or_else(SessionError::no_authentication_data)
}

impl<P> FromRequest for Authenticated<P>
where
    P: Clone + 'static,
{
    type Error = SessionError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticated::<P>(req).map(Authenticated))
    }
}
