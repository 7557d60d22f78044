//! Session verification middleware
//!
//! Reads the session token from the request, verifies it with a fresh
//! session from the configured factory, and attaches the reconciled payload
//! to the request extensions. Any failure responds 401 and stops the request.

use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use super::context::attach;
use super::cookie::token_from_request;
use crate::error::SessionError;
use crate::logging::security;
use crate::session::Session;

type Hook<S> = Rc<dyn Fn(&ServiceRequest, &S)>;

/// Middleware verifying the request's session.
///
/// `factory` builds one session per request; the session's payload ends up
/// in the request as [`Authenticated`](super::Authenticated).
pub struct Identify<S> {
    factory: Rc<dyn Fn() -> S>,
    hooks: Vec<Hook<S>>,
}

impl<S: Session + 'static> Identify<S> {
    pub fn new(factory: impl Fn() -> S + 'static) -> Self {
        Self {
            factory: Rc::new(factory),
            hooks: Vec::new(),
        }
    }

    /// Run `hook` after a successful verify, before the handler. The session
    /// passed in is already verified.
    pub fn with_hook(mut self, hook: impl Fn(&ServiceRequest, &S) + 'static) -> Self {
        self.hooks.push(Rc::new(hook));
        self
    }
}

impl<S> Clone for Identify<S> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
            hooks: self.hooks.clone(),
        }
    }
}

impl<Svc, B, S> Transform<Svc, ServiceRequest> for Identify<S>
where
    Svc: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    Svc::Future: 'static,
    B: 'static,
    S: Session + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = IdentifyMiddleware<Svc, S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: Svc) -> Self::Future {
        ready(Ok(IdentifyMiddleware {
            service,
            factory: Rc::clone(&self.factory),
            hooks: Rc::from(self.hooks.clone()),
        }))
    }
}

pub struct IdentifyMiddleware<Svc, S> {
    service: Svc,
    factory: Rc<dyn Fn() -> S>,
    hooks: Rc<[Hook<S>]>,
}

impl<Svc, S> IdentifyMiddleware<Svc, S>
where
    S: Session,
{
    fn identify(&self, req: &ServiceRequest) -> Result<S, SessionError> {
        let token = token_from_request(req.request()).inspect_err(|err| {
            security::token_rejected(err, req.path(), None);
        })?;

        let mut session = (self.factory)();
        let outcome = session.verify(&token).and_then(|()| {
            session
                .payload()
                .cloned()
                .ok_or_else(SessionError::not_reconciled)
        });

        match outcome {
            Ok(payload) => {
                attach(req, payload);
                Ok(session)
            }
            Err(err) => {
                security::token_rejected(&err, req.path(), Some(&token));
                Err(err)
            }
        }
    }
}

impl<Svc, B, S> Service<ServiceRequest> for IdentifyMiddleware<Svc, S>
where
    Svc: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    Svc::Future: 'static,
    B: 'static,
    S: Session + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.identify(&req) {
            Ok(session) => {
                for hook in self.hooks.iter() {
                    hook(&req, &session);
                }
                debug!(path = req.path(), "Session verified");

                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(err) => Box::pin(async move { Err(err.into()) }),
        }
    }
}
