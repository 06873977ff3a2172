use crate::{
    ast::BinaryOperator,
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
    /// Evaluates `+`, `-` or `*` on two scalars.
    ///
    /// Two integers use checked 64-bit arithmetic. Any real operand promotes
    /// the operation to reals.
    ///
    /// # Errors
    /// `ArithmeticError::Overflow` if the integer result does not fit or the
    /// real result is not finite.
    pub fn eval_scalar_op(op: BinaryOperator,
                          left: Value,
                          right: Value,
                          column: usize)
                          -> EvalResult<Value> {
        if let (Value::Integer(a), Value::Integer(b)) = (left, right) {
            let result = match op {
                BinaryOperator::Add => a.checked_add(b),
                BinaryOperator::Sub => a.checked_sub(b),
                BinaryOperator::Mul => a.checked_mul(b),
                _ => return Self::unsupported(op, column),
            };
            return result.map(Value::Integer)
                         .ok_or(ArithmeticError::Overflow { column });
        }

        let (a, b) = left.promote_to_real(right);
        let result = match op {
            BinaryOperator::Add => a + b,
            BinaryOperator::Sub => a - b,
            BinaryOperator::Mul => a * b,
            _ => return Self::unsupported(op, column),
        };
        finite_real(result, column)
    }

    /// Evaluates true division. The result is always real.
    ///
    /// # Errors
    /// - `ArithmeticError::DivisionByZero` when the divisor is zero.
    /// - `ArithmeticError::Overflow` when the quotient is not finite.
    ///
    /// # Example
    /// ```
    /// use calcguard::interpreter::{evaluator::core::Evaluator, value::core::Value};
    ///
    /// let q = Evaluator::eval_true_div(Value::Integer(6), Value::Integer(3), 1).unwrap();
    /// assert_eq!(q, Value::Real(2.0));
    /// assert!(Evaluator::eval_true_div(Value::Real(1.0), Value::Integer(0), 1).is_err());
    /// ```
    pub fn eval_true_div(left: Value, right: Value, column: usize) -> EvalResult<Value> {
        let (a, b) = left.promote_to_real(right);
        if b == 0.0 {
            return Err(ArithmeticError::DivisionByZero { column });
        }
        finite_real(a / b, column)
    }

    fn unsupported(op: BinaryOperator, column: usize) -> EvalResult<Value> {
        Err(ArithmeticError::TypeError { details: format!("operator '{op}' is not a scalar operation"),
                                         column })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_arithmetic_stays_integral() {
        let v = Evaluator::eval_scalar_op(BinaryOperator::Mul, Value::Integer(6), Value::Integer(7), 1);
        assert_eq!(v, Ok(Value::Integer(42)));
    }

    #[test]
    fn mixed_operands_promote_to_real() {
        let v = Evaluator::eval_scalar_op(BinaryOperator::Sub, Value::Integer(1), Value::Real(0.5), 1);
        assert_eq!(v, Ok(Value::Real(0.5)));
    }

    #[test]
    fn integer_overflow_is_reported() {
        let v = Evaluator::eval_scalar_op(BinaryOperator::Add, Value::Integer(i64::MAX), Value::Integer(1), 9);
        assert_eq!(v, Err(ArithmeticError::Overflow { column: 9 }));
    }

    #[test]
    fn real_overflow_is_reported() {
        let v = Evaluator::eval_scalar_op(BinaryOperator::Mul, Value::Real(1e308), Value::Real(10.0), 2);
        assert_eq!(v, Err(ArithmeticError::Overflow { column: 2 }));
    }
}
