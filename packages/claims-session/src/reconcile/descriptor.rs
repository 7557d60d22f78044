//! Compile-time field descriptors for destination records.

use serde_json::{Map, Value};

use super::coerce::FromClaim;

/// How a single field was populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// The decoded value already had the declared type
    Exact,
    /// The decoded value was converted into the declared type
    Converted,
    /// The decoded value could not be used; the field keeps its zero value
    Skipped,
}

/// One declared field of a destination record.
pub struct FieldDescriptor<T> {
    /// Field identifier as written in the struct
    pub ident: &'static str,
    /// Explicit external name, if the field is renamed on the wire
    pub tag: Option<&'static str>,
    pub assign: fn(&mut T, &Value) -> Assignment,
}

impl<T> FieldDescriptor<T> {
    /// Name looked up in the decoded claims.
    pub fn external_name(&self) -> &'static str {
        self.tag.unwrap_or(self.ident)
    }
}

impl<T> std::fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("ident", &self.ident)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// A record that can be rebuilt field by field from decoded claims.
///
/// Implement it with [`claims_record!`](crate::claims_record) rather than by
/// hand; the descriptor list must follow the struct's declaration order.
pub trait Reconcile: Default + Sized + 'static {
    const FIELDS: &'static [FieldDescriptor<Self>];
}

/// Assign `value` into `slot` if it is usable, leaving `slot` untouched otherwise.
pub fn assign<F: FromClaim>(slot: &mut F, value: &Value) -> Assignment {
    if let Some(v) = F::from_exact(value) {
        *slot = v;
        return Assignment::Exact;
    }
    match F::convert(value) {
        Some(v) => {
            *slot = v;
            Assignment::Converted
        }
        None => Assignment::Skipped,
    }
}

/// Build a `T` from a claims mapping using its descriptor list.
pub fn reconcile_fields<T: Reconcile>(map: &Map<String, Value>) -> T {
    let mut record = T::default();
    for field in T::FIELDS {
        let name = field.external_name();
        let Some(value) = map.get(name) else {
            tracing::trace!(field = name, "Field absent from claims");
            continue;
        };

        match (field.assign)(&mut record, value) {
            Assignment::Skipped => {
                tracing::debug!(field = name, "Field not convertible; left at zero value");
            }
            outcome => {
                tracing::trace!(field = name, ?outcome, "Field reconciled");
            }
        }
    }
    record
}

/// Register a struct as a reconcilable destination record.
///
/// Every listed field must implement [`FromClaim`](crate::reconcile::FromClaim);
/// `=> "name"` gives the field an explicit wire name.
///
/// ```
/// use claims_session::claims_record;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct User {
///     id: String,
///     display_name: String,
///     age: i64,
/// }
///
/// claims_record!(User {
///     id,
///     display_name => "name",
///     age,
/// });
/// ```
#[macro_export]
macro_rules! claims_record {
    ($ty:ty { $($field:ident $(=> $tag:literal)?),* $(,)? }) => {
        impl $crate::reconcile::Reconcile for $ty {
            const FIELDS: &'static [$crate::reconcile::FieldDescriptor<Self>] = &[
                $(
                    $crate::reconcile::FieldDescriptor {
                        ident: ::core::stringify!($field),
                        tag: $crate::__claims_tag!($($tag)?),
                        assign: |record: &mut $ty, value: &$crate::Value| {
                            $crate::reconcile::assign(&mut record.$field, value)
                        },
                    },
                )*
            ];
        }

        impl $crate::reconcile::FromClaim for $ty {
            fn from_exact(value: &$crate::Value) -> ::core::option::Option<Self> {
                value
                    .as_object()
                    .map($crate::reconcile::reconcile_fields::<$ty>)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __claims_tag {
    () => {
        ::core::option::Option::None
    };
    ($tag:literal) => {
        ::core::option::Option::Some($tag)
    };
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Account {
        id: String,
        display_name: String,
        age: i64,
        tags: Vec<String>,
    }

    crate::claims_record!(Account {
        id,
        display_name => "name",
        age,
        tags,
    });

    #[test]
    fn test_descriptors_follow_declaration_order() {
        let names: Vec<_> = Account::FIELDS
            .iter()
            .map(FieldDescriptor::external_name)
            .collect();
        assert_eq!(names, vec!["id", "name", "age", "tags"]);
        assert_eq!(Account::FIELDS[1].ident, "display_name");
    }

    fn field_count<T: Reconcile>() -> usize {
        T::FIELDS.len()
    }

    #[test]
    fn test_fields_reachable_through_generic_bound() {
        assert_eq!(field_count::<Account>(), 4);
        let account: Account = reconcile_fields(json!({"tags": ["a"]}).as_object().unwrap());
        assert_eq!(account.tags, vec!["a".to_string()]);
    }

    #[test]
    fn test_assign_reports_outcome() {
        let mut age = 0_i64;
        assert_eq!(assign(&mut age, &json!(7)), Assignment::Exact);
        assert_eq!(age, 7);
        assert_eq!(assign(&mut age, &json!(9.8)), Assignment::Converted);
        assert_eq!(age, 9);
        assert_eq!(assign(&mut age, &json!("ten")), Assignment::Skipped);
        assert_eq!(age, 9);
    }

    #[test]
    fn test_tagged_field_reads_external_name() {
        let map = json!({"id": "u1", "name": "Ann", "display_name": "ignored"});
        let account: Account = reconcile_fields(map.as_object().unwrap());
        assert_eq!(account.display_name, "Ann");
    }
}
