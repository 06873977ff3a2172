use crate::{
    error::ArithmeticError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Computes the absolute value of a number, keeping its type.
///
/// # Errors
/// `ArithmeticError::Overflow` for `abs` of the smallest integer, and
/// `ArgumentCountMismatch` unless exactly one argument is given.
///
/// # Example
/// ```
/// use calcguard::interpreter::{evaluator::function::abs::abs, value::core::Value};
///
/// assert_eq!(abs(&[Value::Integer(-3)], 1).unwrap(), Value::Integer(3));
/// assert_eq!(abs(&[Value::Real(-2.5)], 1).unwrap(), Value::Real(2.5));
/// ```
pub fn abs(args: &[Value], column: usize) -> EvalResult<Value> {
    match args {
        [Value::Integer(n)] => n.checked_abs()
                                .map(Value::Integer)
                                .ok_or(ArithmeticError::Overflow { column }),
        [Value::Real(r)] => Ok(Value::Real(r.abs())),
        _ => Err(ArithmeticError::ArgumentCountMismatch { name: "abs".to_string(),
                                                          expected: "exactly 1".to_string(),
                                                          found: args.len(),
                                                          column }),
    }
}
