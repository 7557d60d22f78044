//! Leaf conversions from decoded claim values into declared field types.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

/// A type a decoded claim value can be assigned to.
///
/// `from_exact` accepts values whose runtime shape already is `Self`;
/// `convert` accepts values that need an explicit, lossless-enough
/// conversion (a float into an integer, an integer into a float, ...).
pub trait FromClaim: Sized {
    fn from_exact(value: &Value) -> Option<Self>;

    fn convert(value: &Value) -> Option<Self> {
        let _ = value;
        None
    }

    fn coerce(value: &Value) -> Option<Self> {
        Self::from_exact(value).or_else(|| Self::convert(value))
    }
}

impl FromClaim for Value {
    fn from_exact(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromClaim for Map<String, Value> {
    fn from_exact(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

impl FromClaim for String {
    fn from_exact(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromClaim for bool {
    fn from_exact(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

macro_rules! integer_from_claim {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromClaim for $t {
                fn from_exact(value: &Value) -> Option<Self> {
                    if let Some(v) = value.as_i64() {
                        return <$t>::try_from(v).ok();
                    }
                    value.as_u64().and_then(|v| <$t>::try_from(v).ok())
                }

                // Floats truncate toward zero; out-of-range values are refused
                // rather than saturated. `MAX as f64` rounds up for 64-bit
                // types, so the upper bound is exclusive.
                fn convert(value: &Value) -> Option<Self> {
                    let f = value.as_f64()?.trunc();
                    if f.is_finite() && f >= <$t>::MIN as f64 && f < <$t>::MAX as f64 + 1.0 {
                        Some(f as $t)
                    } else {
                        None
                    }
                }
            }
        )*
    };
}

integer_from_claim!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! float_from_claim {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromClaim for $t {
                fn from_exact(value: &Value) -> Option<Self> {
                    if value.is_f64() {
                        value.as_f64().map(|f| f as $t)
                    } else {
                        None
                    }
                }

                fn convert(value: &Value) -> Option<Self> {
                    value.as_f64().map(|f| f as $t)
                }
            }
        )*
    };
}

float_from_claim!(f32, f64);

impl<T: FromClaim> FromClaim for Option<T> {
    fn from_exact(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_exact(other).map(Some),
        }
    }

    fn convert(value: &Value) -> Option<Self> {
        T::convert(value).map(Some)
    }
}

impl<T: FromClaim> FromClaim for Box<T> {
    fn from_exact(value: &Value) -> Option<Self> {
        T::from_exact(value).map(Box::new)
    }

    fn convert(value: &Value) -> Option<Self> {
        T::convert(value).map(Box::new)
    }
}

impl<T: FromClaim> FromClaim for Vec<T> {
    fn from_exact(value: &Value) -> Option<Self> {
        value.as_array()?.iter().map(T::from_exact).collect()
    }

    fn convert(value: &Value) -> Option<Self> {
        value.as_array()?.iter().map(T::coerce).collect()
    }
}

impl<T: FromClaim> FromClaim for HashMap<String, T> {
    fn from_exact(value: &Value) -> Option<Self> {
        value
            .as_object()?
            .iter()
            .map(|(k, v)| T::from_exact(v).map(|v| (k.clone(), v)))
            .collect()
    }

    fn convert(value: &Value) -> Option<Self> {
        value
            .as_object()?
            .iter()
            .map(|(k, v)| T::coerce(v).map(|v| (k.clone(), v)))
            .collect()
    }
}

impl<T: FromClaim> FromClaim for BTreeMap<String, T> {
    fn from_exact(value: &Value) -> Option<Self> {
        value
            .as_object()?
            .iter()
            .map(|(k, v)| T::from_exact(v).map(|v| (k.clone(), v)))
            .collect()
    }

    fn convert(value: &Value) -> Option<Self> {
        value
            .as_object()?
            .iter()
            .map(|(k, v)| T::coerce(v).map(|v| (k.clone(), v)))
            .collect()
    }
}
