//! Claims reconciliation: rebuilding a caller's destination type from the
//! generic payload recovered from a verified token.
//!
//! Reconciliation is best effort per field. Missing fields keep their zero
//! value so records can grow fields after tokens were issued, and a field
//! whose decoded value cannot be converted is left at zero instead of
//! failing the whole verification.

pub mod coerce;
pub mod descriptor;

use serde_json::Value;
use tracing::debug;

pub use coerce::FromClaim;
pub use descriptor::{assign, reconcile_fields, Assignment, FieldDescriptor, Reconcile};

/// Reconcile a decoded payload into `T`.
///
/// A payload that already satisfies `T` (a scalar issued as a scalar, or a
/// mapping into a record or map type) is converted directly; anything else
/// yields `T::default()`.
pub fn reconcile<T>(payload: &Value) -> T
where
    T: FromClaim + Default,
{
    match T::coerce(payload) {
        Some(value) => value,
        None => {
            debug!(
                payload_kind = kind_of(payload),
                destination = std::any::type_name::<T>(),
                "Payload does not fit destination; using zero value"
            );
            T::default()
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
