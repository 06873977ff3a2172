use crate::{
    error::ArithmeticError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::Arity},
        value::core::Value,
    },
};

/// Checks the number of arguments passed to a function.
///
/// # Parameters
/// - `name`: Function name, for the error message.
/// - `arity`: The accepted argument counts.
/// - `found`: The number of arguments supplied.
/// - `column`: Column of the call.
///
/// # Errors
/// `ArithmeticError::ArgumentCountMismatch` when `found` is not accepted.
///
/// # Example
/// ```
/// use calcguard::interpreter::evaluator::{function::core::Arity, utils::check_arity};
///
/// assert!(check_arity("round", Arity::OneOf(&[1, 2]), 2, 1).is_ok());
/// assert!(check_arity("abs", Arity::Exact(1), 3, 1).is_err());
/// ```
pub fn check_arity(name: &str, arity: Arity, found: usize, column: usize) -> EvalResult<()> {
    if arity.accepts(found) {
        return Ok(());
    }
    Err(ArithmeticError::ArgumentCountMismatch { name: name.to_string(),
                                                 expected: arity.to_string(),
                                                 found,
                                                 column })
}

/// Wraps a real result, rejecting infinities and NaN.
///
/// # Errors
/// `ArithmeticError::Overflow` when `value` is not finite.
pub fn finite_real(value: f64, column: usize) -> EvalResult<Value> {
    if value.is_finite() {
        Ok(Value::Real(value))
    } else {
        Err(ArithmeticError::Overflow { column })
    }
}
