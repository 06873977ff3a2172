use crate::{error::ArithmeticError, interpreter::evaluator::core::EvalResult};

/// Smallest `f64` strictly above the `i64` range (`2^63`).
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Converts an `i64` to the nearest `f64`.
///
/// Integers whose magnitude exceeds `2^53` are rounded to the nearest
/// representable value, the same way mixed integer/real arithmetic
/// promotes its operands.
///
/// ## Example
/// ```
/// use calcguard::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(42), 42.0);
/// assert_eq!(i64_to_f64(9_007_199_254_740_993), 9_007_199_254_740_992.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Safely converts an integral `f64` to `i64`.
///
/// ## Errors
/// Returns `ArithmeticError::Overflow` for non-finite or out-of-range values
/// and `ArithmeticError::Domain` for fractional values.
///
/// ## Example
/// ```
/// use calcguard::{error::ArithmeticError, util::num::f64_to_i64_checked};
///
/// assert_eq!(f64_to_i64_checked(1000.0, 1).unwrap(), 1000);
///
/// let err = f64_to_i64_checked(1e20, 5).unwrap_err();
/// assert!(matches!(err, ArithmeticError::Overflow { column: 5 }));
///
/// let err = f64_to_i64_checked(1.5, 7).unwrap_err();
/// assert!(matches!(err, ArithmeticError::Domain { column: 7, .. }));
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i64_checked(value: f64, column: usize) -> EvalResult<i64> {
    if !value.is_finite() || value >= I64_UPPER_BOUND || value < -I64_UPPER_BOUND {
        return Err(ArithmeticError::Overflow { column });
    }
    if value.fract() != 0.0 {
        return Err(ArithmeticError::Domain { details: format!("{value} is not an integer"),
                                             column });
    }
    Ok(value as i64)
}

/// Safely converts an `i64` to `u32`.
///
/// ## Errors
/// Returns `ArithmeticError::Overflow` when the value exceeds `u32::MAX` and
/// `ArithmeticError::Domain` when it is negative.
///
/// ## Example
/// ```
/// use calcguard::{error::ArithmeticError, util::num::i64_to_u32_checked};
///
/// assert_eq!(i64_to_u32_checked(45, 5).unwrap(), 45);
///
/// let err = i64_to_u32_checked(i64::MAX, 11).unwrap_err();
/// assert!(matches!(err, ArithmeticError::Overflow { column: 11 }));
/// ```
pub fn i64_to_u32_checked(value: i64, column: usize) -> EvalResult<u32> {
    if value < 0 {
        return Err(ArithmeticError::Domain { details: format!("{value} is negative"),
                                             column });
    }
    u32::try_from(value).map_err(|_| ArithmeticError::Overflow { column })
}

/// Converts an `i64` to `i32`, saturating at the `i32` bounds.
///
/// Used for decimal-digit counts, where anything beyond a few hundred digits
/// behaves identically.
///
/// ## Example
/// ```
/// use calcguard::util::num::i64_to_i32_saturating;
///
/// assert_eq!(i64_to_i32_saturating(-3), -3);
/// assert_eq!(i64_to_i32_saturating(i64::MAX), i32::MAX);
/// ```
#[must_use]
pub fn i64_to_i32_saturating(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}
