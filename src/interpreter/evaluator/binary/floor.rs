use crate::{
    error::ArithmeticError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator},
            utils::finite_real,
        },
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates floor division `a // b`.
    ///
    /// The quotient is rounded towards negative infinity. Two integers give
    /// an integer; any real operand gives a real.
    ///
    /// # Errors
    /// - `ArithmeticError::DivisionByZero` when `b` is zero.
    /// - `ArithmeticError::Overflow` for `i64::MIN // -1`.
    ///
    /// # Example
    /// ```
    /// use calcguard::interpreter::{evaluator::core::Evaluator, value::core::Value};
    ///
    /// let q = Evaluator::eval_floor_div(Value::Integer(-7), Value::Integer(2), 1).unwrap();
    /// assert_eq!(q, Value::Integer(-4));
    /// ```
    pub fn eval_floor_div(left: Value, right: Value, column: usize) -> EvalResult<Value> {
        if let (Value::Integer(a), Value::Integer(b)) = (left, right) {
            if b == 0 {
                return Err(ArithmeticError::DivisionByZero { column });
            }
            let quotient = a.checked_div(b)
                            .ok_or(ArithmeticError::Overflow { column })?;
            let inexact = a.wrapping_rem(b) != 0;
            let adjust = i64::from(inexact && (a < 0) != (b < 0));
            return Ok(Value::Integer(quotient - adjust));
        }

        let (a, b) = left.promote_to_real(right);
        if b == 0.0 {
            return Err(ArithmeticError::DivisionByZero { column });
        }
        finite_real(float_divmod(a, b).0, column)
    }

    /// Evaluates the modulo `a % b`.
    ///
    /// The result is zero or has the sign of `b`, so that
    /// `(a // b) * b + a % b == a`.
    ///
    /// # Errors
    /// `ArithmeticError::DivisionByZero` when `b` is zero.
    ///
    /// # Example
    /// ```
    /// use calcguard::interpreter::{evaluator::core::Evaluator, value::core::Value};
    ///
    /// let r = Evaluator::eval_modulo(Value::Integer(-7), Value::Integer(3), 1).unwrap();
    /// assert_eq!(r, Value::Integer(2));
    ///
    /// let r = Evaluator::eval_modulo(Value::Real(7.5), Value::Integer(-2), 1).unwrap();
    /// assert_eq!(r, Value::Real(-0.5));
    /// ```
    pub fn eval_modulo(left: Value, right: Value, column: usize) -> EvalResult<Value> {
        if let (Value::Integer(a), Value::Integer(b)) = (left, right) {
            if b == 0 {
                return Err(ArithmeticError::DivisionByZero { column });
            }
            let mut remainder = a.wrapping_rem(b);
            if remainder != 0 && (remainder < 0) != (b < 0) {
                remainder += b;
            }
            return Ok(Value::Integer(remainder));
        }

        let (a, b) = left.promote_to_real(right);
        if b == 0.0 {
            return Err(ArithmeticError::DivisionByZero { column });
        }
        finite_real(float_divmod(a, b).1, column)
    }
}

/// Computes the floored quotient and the remainder of two reals.
///
/// The remainder comes from `fmod` and is moved to the divisor's sign; the
/// quotient is derived from it so that both stay consistent for inexact
/// divisions. `b` must not be zero.
fn float_divmod(a: f64, b: f64) -> (f64, f64) {
    let mut modulo = a % b;
    let mut quotient = (a - modulo) / b;

    if modulo == 0.0 {
        modulo = 0f64.copysign(b);
    } else if (b < 0.0) != (modulo < 0.0) {
        modulo += b;
        quotient -= 1.0;
    }

    let floored = if quotient == 0.0 {
        0f64.copysign(a / b)
    } else {
        let mut floored = quotient.floor();
        if quotient - floored > 0.5 {
            floored += 1.0;
        }
        floored
    };

    (floored, modulo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_floor_division_rounds_down() {
        let cases = [(7, 2, 3), (-7, 2, -4), (7, -2, -4), (-7, -2, 3), (6, 3, 2), (-6, 3, -2)];
        for (a, b, expected) in cases {
            assert_eq!(Evaluator::eval_floor_div(Value::Integer(a), Value::Integer(b), 1),
                       Ok(Value::Integer(expected)),
                       "{a} // {b}");
        }
    }

    #[test]
    fn integer_modulo_takes_the_divisor_sign() {
        let cases = [(7, 3, 1), (-7, 3, 2), (7, -3, -2), (-7, -3, -1), (i64::MIN, -1, 0)];
        for (a, b, expected) in cases {
            assert_eq!(Evaluator::eval_modulo(Value::Integer(a), Value::Integer(b), 1),
                       Ok(Value::Integer(expected)),
                       "{a} % {b}");
        }
    }

    #[test]
    fn real_floor_division_matches_divmod() {
        assert_eq!(float_divmod(7.5, 2.0), (3.0, 1.5));
        assert_eq!(float_divmod(-7.5, 2.0), (-4.0, 0.5));
        assert_eq!(float_divmod(1.0, 0.1), (9.0, 0.09999999999999995));
    }

    #[test]
    fn zero_divisors_are_rejected() {
        assert_eq!(Evaluator::eval_floor_div(Value::Integer(1), Value::Integer(0), 4),
                   Err(ArithmeticError::DivisionByZero { column: 4 }));
        assert_eq!(Evaluator::eval_modulo(Value::Real(1.0), Value::Real(0.0), 4),
                   Err(ArithmeticError::DivisionByZero { column: 4 }));
    }

    #[test]
    fn smallest_integer_floor_divided_by_minus_one_overflows() {
        assert_eq!(Evaluator::eval_floor_div(Value::Integer(i64::MIN), Value::Integer(-1), 1),
                   Err(ArithmeticError::Overflow { column: 1 }));
    }
}
