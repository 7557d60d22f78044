//! Session façade: issuing tokens for a payload and verifying them back into
//! the shape a caller asks for.

pub mod shape;

use std::sync::Arc;
use std::time::SystemTime;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::auth::claims::Claims;
use crate::auth::jwt::{encode_claims, issue_claims, verify_claims};
use crate::error::SessionError;
use crate::reconcile::{reconcile, FromClaim};
use crate::state::secret_store;
use crate::state::security_config::SecurityConfig;

pub use shape::{Payload, Shape};

/// Issue a token for `extension` with the process-wide configuration.
pub fn issue<E>(extension: &E) -> Result<String, SessionError>
where
    E: Serialize + ?Sized,
{
    let security = secret_store::current();
    let claims = issue_claims(extension, SystemTime::now(), &security)?;
    encode_claims(&claims, &security)
}

/// Verify `token` with the process-wide configuration and reconcile its
/// payload into `shape`.
pub fn verify<T>(token: &str, shape: Shape<T>) -> Result<Payload<T>, SessionError>
where
    T: FromClaim + Default,
{
    verify_with(token, shape, SystemTime::now(), &secret_store::current())
}

/// [`verify`] against an explicit clock and configuration.
pub fn verify_with<T>(
    token: &str,
    shape: Shape<T>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<Payload<T>, SessionError>
where
    T: FromClaim + Default,
{
    if token.trim().is_empty() {
        return Err(SessionError::no_authentication_data());
    }
    let claims = verify_claims(token, now, security)?;
    Ok(reconcile_claims(claims, shape))
}

/// Turn verified (or expired) claims into the requested shape.
pub fn reconcile_claims<T>(claims: Claims, shape: Shape<T>) -> Payload<T>
where
    T: FromClaim + Default,
{
    match shape {
        Shape::Absent => Payload::Generic(claims.into_generic()),
        Shape::Trusted(value) => {
            debug!("Destination already populated; skipping reconciliation");
            Payload::Typed(value)
        }
        Shape::Record => Payload::Typed(reconcile(&claims.payload())),
    }
}

/// Capabilities any session implementation provides.
///
/// [`DefaultSession`] reconciles claims into a destination shape; callers can
/// plug in their own implementation wherever a `Session` is expected, e.g.
/// in the [`Identify`](crate::web::Identify) middleware.
pub trait Session {
    /// Value attached to the request after a successful verify.
    type Payload: Clone + 'static;

    /// Sign a token for the session's payload.
    fn issue(&mut self) -> Result<String, SessionError>;

    /// Verify `token` and populate the session from it.
    fn verify(&mut self, token: &str) -> Result<(), SessionError>;

    fn is_reconciled(&self) -> bool;

    fn payload(&self) -> Option<&Self::Payload>;
}

/// Reconciliation-based session.
///
/// Before verification it holds the destination [`Shape`]; afterwards it
/// holds the verified claims and the reconciled payload. After an expired
/// token the claims are kept (and [`Session::issue`] re-signs them with a
/// fresh expiry) but no payload is produced.
#[derive(Debug, Clone)]
pub struct DefaultSession<T> {
    shape: Shape<T>,
    claims: Option<Claims>,
    payload: Option<Payload<T>>,
    security: Option<Arc<SecurityConfig>>,
}

impl<T> DefaultSession<T> {
    pub fn new(shape: Shape<T>) -> Self {
        Self {
            shape,
            claims: None,
            payload: None,
            security: None,
        }
    }

    /// Use `security` instead of the process-wide configuration.
    pub fn with_security(mut self, security: Arc<SecurityConfig>) -> Self {
        self.security = Some(security);
        self
    }

    pub fn shape(&self) -> &Shape<T> {
        &self.shape
    }

    /// Claims of the last issued or verified token, expired ones included.
    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    pub fn into_payload(self) -> Option<Payload<T>> {
        self.payload
    }

    fn security(&self) -> Arc<SecurityConfig> {
        match &self.security {
            Some(security) => Arc::clone(security),
            None => secret_store::current(),
        }
    }
}

impl<T: Default + PartialEq> DefaultSession<T> {
    /// Session for a caller value, classified with [`Shape::of`].
    pub fn for_value(value: T) -> Self {
        Self::new(Shape::of(value))
    }
}

impl DefaultSession<Map<String, Value>> {
    /// Session whose verified payload is the generic claims mapping.
    pub fn generic() -> Self {
        Self::new(Shape::Absent)
    }
}

impl<T> DefaultSession<T>
where
    T: Serialize + Default,
{
    fn issuance_payload(&self) -> Result<Value, SessionError> {
        if let Some(Payload::Typed(value)) = &self.payload {
            return Ok(serde_json::to_value(value)?);
        }
        if let Some(claims) = &self.claims {
            return Ok(claims.payload());
        }
        match &self.shape {
            Shape::Trusted(value) => Ok(serde_json::to_value(value)?),
            Shape::Record => Ok(serde_json::to_value(T::default())?),
            Shape::Absent => Ok(Value::Null),
        }
    }
}

impl<T> Session for DefaultSession<T>
where
    T: Serialize + FromClaim + Default + Clone + 'static,
{
    type Payload = Payload<T>;

    fn issue(&mut self) -> Result<String, SessionError> {
        let security = self.security();
        let extension = self.issuance_payload()?;
        let claims = issue_claims(&extension, SystemTime::now(), &security)?;
        let token = encode_claims(&claims, &security)?;
        self.claims = Some(claims);
        Ok(token)
    }

    fn verify(&mut self, token: &str) -> Result<(), SessionError> {
        self.claims = None;
        self.payload = None;

        if token.trim().is_empty() {
            return Err(SessionError::no_authentication_data());
        }

        match verify_claims(token, SystemTime::now(), &self.security()) {
            Ok(claims) => {
                self.payload = Some(reconcile_claims(claims.clone(), self.shape.clone()));
                self.claims = Some(claims);
                Ok(())
            }
            Err(SessionError::Expired { claims }) => {
                self.claims = Some(Claims::clone(&claims));
                Err(SessionError::Expired { claims })
            }
            Err(err) => Err(err),
        }
    }

    fn is_reconciled(&self) -> bool {
        self.payload.is_some()
    }

    fn payload(&self) -> Option<&Payload<T>> {
        self.payload.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default, Clone, PartialEq, Serialize)]
    struct User {
        id: String,
        name: String,
        age: i64,
    }

    crate::claims_record!(User { id, name, age });

    fn security() -> Arc<SecurityConfig> {
        Arc::new(SecurityConfig::new("session-unit-test-secret"))
    }

    fn ann() -> User {
        User {
            id: "u1".to_string(),
            name: "Ann".to_string(),
            age: 30,
        }
    }

    fn token_for(user: &User) -> String {
        let mut session = DefaultSession::for_value(user.clone()).with_security(security());
        session.issue().unwrap()
    }

    #[test]
    fn test_issue_records_claims() {
        let mut session = DefaultSession::for_value(ann()).with_security(security());
        let token = session.issue().unwrap();

        assert!(!token.is_empty());
        assert_eq!(
            session.claims().map(Claims::payload),
            Some(json!({"id": "u1", "name": "Ann", "age": 30}))
        );
        assert!(!session.is_reconciled());
    }

    #[test]
    fn test_verify_into_record() {
        let token = token_for(&ann());
        let mut session = DefaultSession::<User>::new(Shape::Record).with_security(security());

        session.verify(&token).unwrap();
        assert!(session.is_reconciled());
        assert_eq!(session.payload(), Some(&Payload::Typed(ann())));
    }

    #[test]
    fn test_verify_generic() {
        let token = token_for(&ann());
        let mut session = DefaultSession::generic().with_security(security());

        session.verify(&token).unwrap();
        let generic = session.into_payload().and_then(Payload::into_generic).unwrap();
        assert_eq!(generic.get("name"), Some(&json!("Ann")));
        assert!(generic.contains_key("exp"));
    }

    #[test]
    fn test_verify_trusted_value_is_unchanged() {
        let token = token_for(&ann());
        let preset = User {
            id: "preset".to_string(),
            ..User::default()
        };
        let mut session = DefaultSession::for_value(preset.clone()).with_security(security());

        session.verify(&token).unwrap();
        assert_eq!(session.payload(), Some(&Payload::Typed(preset)));
    }

    #[test]
    fn test_verify_empty_token() {
        let mut session = DefaultSession::<User>::new(Shape::Record).with_security(security());
        let err = session.verify("  ").unwrap_err();
        assert!(matches!(err, SessionError::NoAuthenticationData));
        assert!(!session.is_reconciled());
    }

    #[test]
    fn test_verify_failure_clears_previous_state() {
        let token = token_for(&ann());
        let mut session = DefaultSession::<User>::new(Shape::Record).with_security(security());
        session.verify(&token).unwrap();

        assert!(session.verify("garbage").is_err());
        assert!(!session.is_reconciled());
        assert!(session.claims().is_none());
    }

    #[test]
    fn test_reissue_after_verify_refreshes_expiry() {
        let short = Arc::new(
            SecurityConfig::new("refresh").with_token_lifetime(Duration::from_secs(5)),
        );
        let mut issuer = DefaultSession::for_value(ann()).with_security(Arc::clone(&short));
        let token = issuer.issue().unwrap();

        let long = Arc::new(SecurityConfig::new("refresh"));
        let mut session = DefaultSession::<User>::new(Shape::Record).with_security(long);
        session.verify(&token).unwrap();
        let first_exp = session.claims().map(|c| c.exp).unwrap();

        let refreshed = session.issue().unwrap();
        assert_ne!(refreshed, token);
        assert!(session.claims().map(|c| c.exp).unwrap() > first_exp);
    }

    #[test]
    fn test_expired_claims_stay_available() {
        let expired = security();
        let issued = SystemTime::now() - Duration::from_secs(25 * 60 * 60);
        let claims = issue_claims(&ann(), issued, &expired).unwrap();
        let token = encode_claims(&claims, &expired).unwrap();

        let mut session = DefaultSession::<User>::new(Shape::Record).with_security(expired);
        let err = session.verify(&token).unwrap_err();

        assert!(err.is_expired());
        assert!(!session.is_reconciled());
        assert_eq!(session.claims(), Some(&claims));

        let recovered =
            reconcile_claims(err.expired_claims().cloned().unwrap(), Shape::<User>::Record);
        assert_eq!(recovered, Payload::Typed(ann()));
    }

    #[test]
    fn test_verify_with_rejects_empty_token() {
        let result = verify_with("", Shape::<User>::Record, SystemTime::now(), &security());
        assert!(matches!(result, Err(SessionError::NoAuthenticationData)));
    }
}
