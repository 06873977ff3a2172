use crate::{
    error::ArithmeticError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::{f64_to_i64_checked, i64_to_i32_saturating},
};

/// Largest power of ten that fits in an `i64` is `10^18`; rounding to a
/// coarser multiple than `10^19` always yields zero.
const MAX_INTEGER_ROUNDING_DIGITS: u32 = 19;

/// Rounding a real to more places than this returns it unchanged.
const MAX_REAL_ROUNDING_DIGITS: usize = 323;

/// Rounds a number half to even.
///
/// - `round(x)` returns the nearest integer as an `Integer`.
/// - `round(x, n)` keeps the type of `x`. A real `x` is rounded half to even
///   on the exact decimal value of its binary representation, so
///   `round(1.005, 2)` is `1.0` because `1.005` is stored as
///   `1.00499999...`. For an integer `x` the result is exact:
///   unchanged for `n >= 0`, otherwise the nearest multiple of `10^-n`.
///
/// # Errors
/// - `TypeError` if `n` is not an integer.
/// - `Overflow` if the rounded value does not fit an integer.
///
/// # Example
/// ```
/// use calcguard::interpreter::{evaluator::function::round::round, value::core::Value};
///
/// assert_eq!(round(&[Value::Real(2.5)], 1).unwrap(), Value::Integer(2));
/// assert_eq!(round(&[Value::Real(3.5)], 1).unwrap(), Value::Integer(4));
/// assert_eq!(round(&[Value::Real(1.005), Value::Integer(2)], 1).unwrap(),
///            Value::Real(1.0));
/// assert_eq!(round(&[Value::Integer(1250), Value::Integer(-2)], 1).unwrap(),
///            Value::Integer(1200));
/// ```
pub fn round(args: &[Value], column: usize) -> EvalResult<Value> {
    match args {
        [Value::Integer(n)] => Ok(Value::Integer(*n)),
        [Value::Real(r)] => f64_to_i64_checked(r.round_ties_even(), column).map(Value::Integer),
        [value, Value::Integer(digits)] => match value {
            Value::Integer(n) => round_integer(*n, *digits, column).map(Value::Integer),
            Value::Real(r) => Ok(Value::Real(round_real(*r, *digits))),
        },
        [_, digits] => {
            Err(ArithmeticError::TypeError { details: format!("round() digits must be an integer, not a {}",
                                                              digits.type_name()),
                                             column })
        },
        _ => Err(ArithmeticError::ArgumentCountMismatch { name: "round".to_string(),
                                                          expected: "1 or 2".to_string(),
                                                          found: args.len(),
                                                          column }),
    }
}

/// Rounds a real to `digits` decimal digits, half to even on the exact
/// decimal expansion of its binary value.
///
/// `2.675` is stored as `2.67499999...`, so it rounds down to `2.67`; only
/// values that are exact ties in binary, such as `0.125`, go to the even
/// digit. More digits than any `f64` expansion has leave the value unchanged,
/// and a scale factor beyond the `f64` range gives a signed zero for
/// negative `digits`.
///
/// # Example
/// ```
/// use calcguard::interpreter::evaluator::function::round::round_real;
///
/// assert_eq!(round_real(2.675, 2), 2.67);
/// assert_eq!(round_real(1.005, 2), 1.0);
/// assert_eq!(round_real(0.125, 2), 0.12);
/// assert_eq!(round_real(1234.5, -2), 1200.0);
/// ```
#[must_use]
pub fn round_real(value: f64, digits: i64) -> f64 {
    let digits = i64_to_i32_saturating(digits);

    if let Ok(places) = usize::try_from(digits) {
        if places > MAX_REAL_ROUNDING_DIGITS {
            return value;
        }
        // Float formatting is exact and ties to even.
        return format!("{value:.places$}").parse().unwrap_or(value);
    }

    let factor = 10f64.powi(digits.saturating_neg());
    if !factor.is_finite() {
        return 0f64.copysign(value);
    }
    (value / factor).round_ties_even() * factor
}

/// Rounds an integer to the nearest multiple of `10^-digits`, half to even.
///
/// Non-negative `digits` leave the integer unchanged.
fn round_integer(value: i64, digits: i64, column: usize) -> EvalResult<i64> {
    if digits >= 0 {
        return Ok(value);
    }
    let Ok(places) = u32::try_from(digits.unsigned_abs()) else {
        return Ok(0);
    };
    if places > MAX_INTEGER_ROUNDING_DIGITS {
        return Ok(0);
    }

    let unit = 10i128.pow(places);
    let value = i128::from(value);
    let mut quotient = value.div_euclid(unit);
    let remainder = value.rem_euclid(unit);

    match (2 * remainder).cmp(&unit) {
        std::cmp::Ordering::Greater => quotient += 1,
        std::cmp::Ordering::Equal if quotient % 2 != 0 => quotient += 1,
        _ => {},
    }

    i64::try_from(quotient * unit).map_err(|_| ArithmeticError::Overflow { column })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_argument_rounds_ties_to_even() {
        for (input, expected) in [(0.5, 0), (1.5, 2), (-0.5, 0), (-1.5, -2), (2.4999, 2)] {
            assert_eq!(round(&[Value::Real(input)], 1).unwrap(),
                       Value::Integer(expected),
                       "round({input})");
        }
    }

    #[test]
    fn huge_reals_do_not_fit_an_integer() {
        assert_eq!(round(&[Value::Real(1e300)], 3), Err(ArithmeticError::Overflow { column: 3 }));
    }

    #[test]
    fn real_digits_are_rejected() {
        assert!(matches!(round(&[Value::Real(1.5), Value::Real(1.0)], 1),
                         Err(ArithmeticError::TypeError { .. })));
    }

    #[test]
    fn integer_rounding_is_exact() {
        assert_eq!(round_integer(150, -2, 1), Ok(200));
        assert_eq!(round_integer(250, -2, 1), Ok(200));
        assert_eq!(round_integer(-250, -2, 1), Ok(-200));
        assert_eq!(round_integer(-251, -2, 1), Ok(-300));
        assert_eq!(round_integer(123, 5, 1), Ok(123));
        assert_eq!(round_integer(i64::MAX, -30, 1), Ok(0));
        assert_eq!(round_integer(i64::MAX, -19, 1), Err(ArithmeticError::Overflow { column: 1 }));
    }

    #[test]
    fn reals_round_on_their_exact_binary_value() {
        for (input, digits, expected) in [(2.675, 2, 2.67),
                                          (-2.675, 2, -2.67),
                                          (0.125, 2, 0.12),
                                          (0.375, 2, 0.38),
                                          (1.005, 2, 1.0),
                                          (2.5, 0, 2.0),
                                          (0.285, 2, 0.28),
                                          (123.456, 1, 123.5)]
        {
            assert_eq!(round_real(input, digits), expected, "round({input}, {digits})");
        }
        assert!(round_real(-0.001, 2).is_sign_negative());
    }

    #[test]
    fn extreme_digit_counts_are_harmless() {
        assert_eq!(round_real(1.5, 400), 1.5);
        assert_eq!(round_real(-123.0, -400), -0.0);
        assert!(round_real(-123.0, -400).is_sign_negative());
        assert_eq!(round_real(1.7e308, 2), 1.7e308);
    }
}
