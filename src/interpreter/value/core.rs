use std::cmp::Ordering;

use crate::{
    ast::LiteralValue,
    interpreter::value::repr::format_real,
    util::num::i64_to_f64,
};

/// Represents the numeric result of an evaluation.
///
/// Integer arithmetic stays in `Integer` as long as both operands are
/// integers and the operation is closed over integers; any `Real` operand,
/// and true division, produces a `Real`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A finite double-precision floating-point number.
    Real(f64),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<LiteralValue> for Value {
    fn from(literal: LiteralValue) -> Self {
        match literal {
            LiteralValue::Integer(n) => Self::Integer(n),
            LiteralValue::Real(r) => Self::Real(r),
        }
    }
}

impl Value {
    /// Converts the value to an `f64`, promoting integers.
    ///
    /// # Example
    /// ```
    /// use calcguard::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(10).as_real(), 10.0);
    /// assert_eq!(Value::Real(2.5).as_real(), 2.5);
    /// ```
    #[must_use]
    pub const fn as_real(&self) -> f64 {
        match self {
            Self::Integer(n) => i64_to_f64(*n),
            Self::Real(r) => *r,
        }
    }

    /// The user-facing name of the value's type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
        }
    }

    /// Promotes both operands to `f64`.
    #[must_use]
    pub const fn promote_to_real(self, other: Self) -> (f64, f64) {
        (self.as_real(), other.as_real())
    }

    /// Compares two values numerically.
    ///
    /// Two integers compare exactly; otherwise both sides are promoted to
    /// reals. Values are always finite, so the order is total.
    ///
    /// # Example
    /// ```
    /// use std::cmp::Ordering;
    ///
    /// use calcguard::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(2).compare(&Value::Real(2.5)), Ordering::Less);
    /// assert_eq!(Value::Real(3.0).compare(&Value::Integer(3)), Ordering::Equal);
    /// ```
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            _ => self.as_real().total_cmp(&other.as_real()),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{}", format_real(*r)),
        }
    }
}
