use crate::{
    ast::UnaryOperator,
    error::ArithmeticError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator {
    /// Applies a unary operator to an evaluated operand.
    ///
    /// - `+` returns the operand unchanged.
    /// - `-` negates; integer negation is checked, since `-i64::MIN`
    ///   overflows.
    ///
    /// # Errors
    /// - `ArithmeticError::Overflow` when negating `i64::MIN`.
    /// - `ArithmeticError::TypeError` for operators that have no numeric
    ///   meaning here.
    ///
    /// # Example
    /// ```
    /// use calcguard::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let v = Evaluator::eval_unary(UnaryOperator::Minus, Value::Integer(4), 1).unwrap();
    /// assert_eq!(v, Value::Integer(-4));
    /// ```
    pub fn eval_unary(op: UnaryOperator, operand: Value, column: usize) -> EvalResult<Value> {
        match (op, operand) {
            (UnaryOperator::Plus, value) => Ok(value),
            (UnaryOperator::Minus, Value::Integer(n)) => {
                n.checked_neg()
                 .map(Value::Integer)
                 .ok_or(ArithmeticError::Overflow { column })
            },
            (UnaryOperator::Minus, Value::Real(r)) => Ok(Value::Real(-r)),
            (op, value) => {
                Err(ArithmeticError::TypeError { details: format!("unsupported operand for unary '{op}': {}",
                                                                  value.type_name()),
                                                 column })
            },
        }
    }
}
