use crate::{
    error::ArithmeticError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator},
            utils::finite_real,
        },
        value::core::Value,
    },
    util::num::{i64_to_f64, i64_to_u32_checked},
};

impl Evaluator {
    /// Evaluates an exponentiation operation.
    ///
    /// Integer–integer exponentiation with a non-negative exponent uses checked
    /// arithmetic. Negative integer exponents are computed in floating-point
    /// form. In all other cases, operands are promoted to real numbers and
    /// evaluated with `powf`.
    ///
    /// # Parameters
    /// - `base`: The base value.
    /// - `exponent`: The exponent value.
    /// - `column`: Column of the operator for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the result of `base ** exponent`.
    ///
    /// # Errors
    /// - `DivisionByZero` when zero is raised to a negative power.
    /// - `Domain` when a negative base is raised to a fractional power.
    /// - `Overflow` when the result does not fit.
    ///
    /// # Example
    /// ```
    /// use calcguard::interpreter::{evaluator::core::Evaluator, value::core::Value};
    ///
    /// let result = Evaluator::eval_pow(Value::Integer(2), Value::Integer(10), 1).unwrap();
    /// assert_eq!(result, Value::Integer(1024));
    ///
    /// let result = Evaluator::eval_pow(Value::Integer(2), Value::Integer(-1), 1).unwrap();
    /// assert_eq!(result, Value::Real(0.5));
    /// ```
    pub fn eval_pow(base: Value, exponent: Value, column: usize) -> EvalResult<Value> {
        match (base, exponent) {
            (Value::Integer(b), Value::Integer(e)) if e >= 0 => integer_pow(b, e, column),
            (Value::Integer(b), Value::Integer(e)) => {
                real_pow(i64_to_f64(b), i64_to_f64(e), column)
            },
            _ => {
                let (b, e) = base.promote_to_real(exponent);
                real_pow(b, e, column)
            },
        }
    }
}

/// Raises an integer to a non-negative integer power.
///
/// Exponents beyond `u32` only produce a representable result for the bases
/// `0`, `1` and `-1`.
fn integer_pow(base: i64, exponent: i64, column: usize) -> EvalResult<Value> {
    match i64_to_u32_checked(exponent, column) {
        Ok(e) => base.checked_pow(e)
                     .map(Value::Integer)
                     .ok_or(ArithmeticError::Overflow { column }),
        Err(error) => match base {
            0 | 1 => Ok(Value::Integer(base)),
            -1 => Ok(Value::Integer(if exponent % 2 == 0 { 1 } else { -1 })),
            _ => Err(error),
        },
    }
}

fn real_pow(base: f64, exponent: f64, column: usize) -> EvalResult<Value> {
    if base == 0.0 && exponent < 0.0 {
        return Err(ArithmeticError::DivisionByZero { column });
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(ArithmeticError::Domain { details: format!("negative number {base} cannot be raised to the fractional power {exponent}"),
                                             column });
    }
    finite_real(base.powf(exponent), column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_to_a_negative_power_divides_by_zero() {
        assert_eq!(Evaluator::eval_pow(Value::Integer(0), Value::Integer(-1), 3),
                   Err(ArithmeticError::DivisionByZero { column: 3 }));
        assert_eq!(Evaluator::eval_pow(Value::Real(0.0), Value::Real(-0.5), 3),
                   Err(ArithmeticError::DivisionByZero { column: 3 }));
    }

    #[test]
    fn negative_base_with_fractional_exponent_is_a_domain_error() {
        assert!(matches!(Evaluator::eval_pow(Value::Integer(-8), Value::Real(0.5), 1),
                         Err(ArithmeticError::Domain { .. })));
        assert_eq!(Evaluator::eval_pow(Value::Integer(-2), Value::Real(2.0), 1),
                   Ok(Value::Real(4.0)));
    }

    #[test]
    fn huge_exponents() {
        assert_eq!(Evaluator::eval_pow(Value::Integer(-1), Value::Integer(i64::MAX), 1),
                   Ok(Value::Integer(-1)));
        assert_eq!(Evaluator::eval_pow(Value::Integer(1), Value::Integer(1 << 40), 1),
                   Ok(Value::Integer(1)));
        assert_eq!(Evaluator::eval_pow(Value::Integer(2), Value::Integer(1 << 40), 7),
                   Err(ArithmeticError::Overflow { column: 7 }));
        assert_eq!(Evaluator::eval_pow(Value::Integer(2), Value::Integer(64), 7),
                   Err(ArithmeticError::Overflow { column: 7 }));
        assert_eq!(Evaluator::eval_pow(Value::Real(10.0), Value::Integer(400), 7),
                   Err(ArithmeticError::Overflow { column: 7 }));
    }
}
