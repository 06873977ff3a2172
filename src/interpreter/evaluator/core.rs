use log::{debug, warn};

use crate::{
    ast::Expr,
    error::{ArithmeticError, DisallowedConstruct, Rejection},
    interpreter::{
        evaluator::{
            function::core::{Binding, lookup},
            utils::check_arity,
        },
        validator::{check_node, resolve_call_target},
        value::core::Value,
    },
};

/// Result type used by the arithmetic routines of the evaluator.
///
/// All arithmetic functions return either a value of type `T` or an
/// `ArithmeticError` describing the failure.
pub type EvalResult<T> = Result<T, ArithmeticError>;

/// Evaluates validated syntax trees.
///
/// The evaluator holds no state: names resolve only through the static name
/// table, and nothing an expression does can outlive its evaluation. Each
/// node is checked against the allow-list again as it is visited, so a tree
/// that skipped validation is still refused before anything outside the
/// allow-list runs.
///
/// ## Usage
///
/// ```
/// use calcguard::interpreter::{
///     evaluator::core::Evaluator, parser::core::parse, value::core::Value,
/// };
///
/// let tree = parse("max(2, 3) * 2").unwrap();
/// assert_eq!(Evaluator::new().eval(&tree).unwrap(), Value::Integer(6));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant: literals, names, unary and
    /// binary operations, and calls. Every other variant is a disallowed
    /// construct.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The numeric value of `expr`.
    ///
    /// # Errors
    /// - `Rejection::Disallowed` for nodes, names or calls outside the
    ///   allow-list.
    /// - `Rejection::Arithmetic` for failures such as division by zero.
    pub fn eval(&self, expr: &Expr) -> Result<Value, Rejection> {
        if let Err(e) = check_node(expr) {
            warn!("refusing to evaluate: {e}");
            return Err(e.into());
        }

        match expr {
            Expr::Literal { value, .. } => Ok((*value).into()),
            Expr::Name { name, column } => Ok(Self::eval_name(name, *column)?),
            Expr::UnaryOp { op, expr, column } => {
                let operand = self.eval(expr)?;
                Ok(Self::eval_unary(*op, operand, *column)?)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             column, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                let result = Self::eval_binary(*op, left, right, *column)?;
                debug!("{left} {op} {right} = {result}");
                Ok(result)
            },
            Expr::Call { function,
                         arguments,
                         column, } => self.eval_call(function, arguments, *column),
            other => Err(DisallowedConstruct::Node { kind:   other.kind(),
                                                     column: other.column(), }.into()),
        }
    }

    /// Resolves a name reference to its value.
    ///
    /// Constants yield their bound real value. A function name used as a value
    /// is a type error; anything else is not in the table at all.
    ///
    /// # Errors
    /// `ArithmeticError::TypeError` for function names, and for names outside
    /// the table (which [`check_node`] refuses before they get here).
    pub fn eval_name(name: &str, column: usize) -> EvalResult<Value> {
        match lookup(name) {
            Some(Binding::Constant(value)) => Ok(Value::Real(*value)),
            Some(Binding::Function { .. }) => {
                Err(ArithmeticError::TypeError { details: format!("function '{name}' is not a number; call it with arguments"),
                                                 column })
            },
            None => Err(ArithmeticError::TypeError { details: format!("'{name}' has no value"),
                                                     column }),
        }
    }

    /// Evaluates a call to a function of the name table.
    ///
    /// Arguments are evaluated left to right, then the argument count is
    /// checked against the function's arity before the function runs.
    ///
    /// # Parameters
    /// - `function`: The call target; must be a plain name bound to a
    ///   function.
    /// - `arguments`: The argument expressions.
    /// - `column`: Column of the call for error reporting.
    fn eval_call(&self, function: &Expr, arguments: &[Expr], column: usize) -> Result<Value, Rejection> {
        let (name, arity, func) = resolve_call_target(function, column)?;

        let values = arguments.iter()
                              .map(|argument| self.eval(argument))
                              .collect::<Result<Vec<_>, _>>()?;
        check_arity(name, arity, values.len(), column)?;

        let result = func(&values, column)?;
        debug!("{name}({}) = {result}",
               values.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "));
        Ok(result)
    }
}
