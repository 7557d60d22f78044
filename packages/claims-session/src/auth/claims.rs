//! Claims carried inside every session token.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SessionError;

/// Standard expiry claim (seconds since epoch).
pub const EXPIRY_CLAIM: &str = "exp";

/// Claim that carries a payload which does not serialize to an object.
pub const EXTENSION_CLAIM: &str = "ext";

/// Claims included in issued session tokens.
///
/// Object payloads are flattened next to `exp`; anything else (a scalar, a
/// sequence, `null`) is carried under `ext`. Both names are reserved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claims {
    /// Expiry (seconds since epoch)
    pub exp: i64,
    #[serde(flatten)]
    pub extension: Map<String, Value>,
}

impl Claims {
    /// Build claims for an extension payload expiring at `exp`.
    pub fn new<E>(extension: &E, exp: i64) -> Result<Self, SessionError>
    where
        E: Serialize + ?Sized,
    {
        let extension = match serde_json::to_value(extension)? {
            Value::Object(map) => {
                if let Some(reserved) = [EXPIRY_CLAIM, EXTENSION_CLAIM]
                    .into_iter()
                    .find(|name| map.contains_key(*name))
                {
                    return Err(SessionError::encoding(format!(
                        "extension payload uses reserved claim name {reserved:?}"
                    )));
                }
                map
            }
            other => {
                let mut map = Map::new();
                map.insert(EXTENSION_CLAIM.to_string(), other);
                map
            }
        };

        Ok(Self { exp, extension })
    }

    /// Split a decoded claims object into expiry and extension.
    ///
    /// Returns `None` when `exp` is missing or not an integer.
    pub fn from_wire(mut raw: Map<String, Value>) -> Option<Self> {
        let exp = raw.remove(EXPIRY_CLAIM)?;
        let exp = exp
            .as_i64()
            .or_else(|| exp.as_u64().map(|v| i64::try_from(v).unwrap_or(i64::MAX)))?;

        Some(Self {
            exp,
            extension: raw,
        })
    }

    /// True when the payload was carried under `ext` rather than flattened.
    pub fn is_wrapped(&self) -> bool {
        self.extension.len() == 1 && self.extension.contains_key(EXTENSION_CLAIM)
    }

    /// The extension payload as issued: the wrapped value for non-object
    /// payloads, otherwise the flattened fields as an object.
    pub fn payload(&self) -> Value {
        if self.is_wrapped() {
            if let Some(value) = self.extension.get(EXTENSION_CLAIM) {
                return value.clone();
            }
        }
        Value::Object(self.extension.clone())
    }

    /// Generic view of the whole claims set, `exp` included.
    pub fn into_generic(self) -> Map<String, Value> {
        let mut map = self.extension;
        map.insert(EXPIRY_CLAIM.to_string(), Value::from(self.exp));
        map
    }

    pub fn expires_at(&self) -> SystemTime {
        match u64::try_from(self.exp) {
            Ok(secs) => UNIX_EPOCH + Duration::from_secs(secs),
            Err(_) => UNIX_EPOCH,
        }
    }
}
