//! Leaf values of the document model.

use std::fmt;

/// A leaf value.
///
/// Adapters decide how raw text is coerced: YAML, JSON and TOML keep their
/// native types, while ENV values always load as [`Scalar::String`].
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Explicit null.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// Text.
    String(String),
}

impl Scalar {
    /// Returns `true` for [`Scalar::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// YAML spelling of a non-finite float: `.inf`, `-.inf` or `.nan`.
    ///
    /// Returns `None` for finite values.
    #[must_use]
    pub const fn non_finite_name(value: f64) -> Option<&'static str> {
        if value.is_nan() {
            Some(".nan")
        } else if value.is_infinite() && value.is_sign_negative() {
            Some("-.inf")
        } else if value.is_infinite() {
            Some(".inf")
        } else {
            None
        }
    }

    /// Borrow the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }
}

/// Renders the value the way flat formats spell it: null is empty, floats
/// keep a fractional part and non-finite floats use `inf`, `-inf` and `nan`.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) if value.is_nan() => f.write_str("nan"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::String(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
