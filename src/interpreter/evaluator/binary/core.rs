use crate::{
    ast::BinaryOperator,
    error::ArithmeticError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates a binary operation between two values.
    ///
    /// Routes the operation to the handler for its operator: `+ - *` to
    /// [`Evaluator::eval_scalar_op`], `/` to [`Evaluator::eval_true_div`],
    /// `//` and `%` to the floor-division handlers, and `**` to
    /// [`Evaluator::eval_pow`].
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `column`: Column of the operator for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Errors
    /// `ArithmeticError::TypeError` for bitwise, shift and matrix operators,
    /// which have no arithmetic meaning here.
    ///
    /// # Example
    /// ```
    /// use calcguard::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let result = Evaluator::eval_binary(BinaryOperator::Add, Value::Integer(3), Value::Integer(4), 1);
    /// assert_eq!(result.unwrap(), Value::Integer(7));
    ///
    /// let result = Evaluator::eval_binary(BinaryOperator::Div, Value::Integer(7), Value::Integer(2), 1);
    /// assert_eq!(result.unwrap(), Value::Real(3.5));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: Value,
                       right: Value,
                       column: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, BitAnd, BitOr, BitXor, Div, FloorDiv, LShift, MatMul, Mod, Mul, Pow, RShift, Sub,
        };

        match op {
            Add | Sub | Mul => Self::eval_scalar_op(op, left, right, column),
            Div => Self::eval_true_div(left, right, column),
            FloorDiv => Self::eval_floor_div(left, right, column),
            Mod => Self::eval_modulo(left, right, column),
            Pow => Self::eval_pow(left, right, column),
            MatMul | LShift | RShift | BitAnd | BitOr | BitXor => {
                Err(ArithmeticError::TypeError { details: format!("unsupported operator '{op}' for {} and {}",
                                                                  left.type_name(),
                                                                  right.type_name()),
                                                 column })
            },
        }
    }
}
