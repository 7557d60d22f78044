use serde_json::{Map, Value};

/// What the caller wants the verified extension payload turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<T> {
    /// No destination: verification yields the generic claims mapping.
    Absent,
    /// Reconcile into a freshly built `T`.
    Record,
    /// Caller already holds the session value; it is returned as-is once the
    /// token verifies.
    Trusted(T),
}

impl<T> Shape<T> {
    pub fn absent() -> Self {
        Shape::Absent
    }

    pub fn record() -> Self {
        Shape::Record
    }

    pub fn trusted(value: T) -> Self {
        Shape::Trusted(value)
    }
}

impl<T: Default + PartialEq> Shape<T> {
    /// Classify a caller-supplied value: a zero value is a placeholder to be
    /// populated, anything else is trusted.
    pub fn of(value: T) -> Self {
        if value == T::default() {
            Shape::Record
        } else {
            Shape::Trusted(value)
        }
    }

    /// Like [`Shape::of`] for a boxed value; the box is unwrapped.
    pub fn of_boxed(value: Box<T>) -> Self {
        Self::of(*value)
    }
}

impl<T: Default + PartialEq> From<Option<T>> for Shape<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Shape::of(value),
            None => Shape::Absent,
        }
    }
}

/// Result of verifying a token against a [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    /// Generic claims mapping, `exp` included.
    Generic(Map<String, Value>),
    Typed(T),
}

impl<T> Payload<T> {
    pub fn as_typed(&self) -> Option<&T> {
        match self {
            Payload::Typed(value) => Some(value),
            Payload::Generic(_) => None,
        }
    }

    pub fn as_generic(&self) -> Option<&Map<String, Value>> {
        match self {
            Payload::Generic(map) => Some(map),
            Payload::Typed(_) => None,
        }
    }

    pub fn into_typed(self) -> Option<T> {
        match self {
            Payload::Typed(value) => Some(value),
            Payload::Generic(_) => None,
        }
    }

    pub fn into_generic(self) -> Option<Map<String, Value>> {
        match self {
            Payload::Generic(map) => Some(map),
            Payload::Typed(_) => None,
        }
    }
}
