use log::{debug, warn};

use crate::{
    ast::{BinaryOperator, Expr, NodeKind, UnaryOperator},
    error::DisallowedConstruct,
    interpreter::evaluator::function::core::{Arity, Binding, BuiltinFn, callable_names, lookup},
};

/// The node kinds an expression may contain.
///
/// Anything not listed here is refused, including operators that would be
/// harmless, such as `<<`, and every display, comprehension and control
/// construct.
pub static ALLOWED_NODE_KINDS: &[NodeKind] = &[NodeKind::Number,
                                               NodeKind::Name,
                                               NodeKind::Call,
                                               NodeKind::BinaryOp(BinaryOperator::Add),
                                               NodeKind::BinaryOp(BinaryOperator::Sub),
                                               NodeKind::BinaryOp(BinaryOperator::Mul),
                                               NodeKind::BinaryOp(BinaryOperator::Div),
                                               NodeKind::BinaryOp(BinaryOperator::Pow),
                                               NodeKind::BinaryOp(BinaryOperator::Mod),
                                               NodeKind::BinaryOp(BinaryOperator::FloorDiv),
                                               NodeKind::UnaryOp(UnaryOperator::Plus),
                                               NodeKind::UnaryOp(UnaryOperator::Minus)];

/// Checks a whole syntax tree against the allow-list.
///
/// Every node is visited in pre-order, descendants included, before any of
/// the tree is evaluated; the first violation is returned.
///
/// # Errors
/// A `DisallowedConstruct` naming the first offending node, call or name.
///
/// # Example
/// ```
/// use calcguard::interpreter::{parser::core::parse, validator::validate};
///
/// assert!(validate(&parse("round(pi * 2, 3)").unwrap()).is_ok());
/// assert!(validate(&parse("max(1, x.y)").unwrap()).is_err());
/// ```
pub fn validate(expr: &Expr) -> Result<(), DisallowedConstruct> {
    let mut visited = 0usize;
    for node in expr.walk() {
        if let Err(e) = check_node(node) {
            warn!("rejected expression: {e}");
            return Err(e);
        }
        visited += 1;
    }
    debug!("validated {visited} node(s)");
    Ok(())
}

/// Checks a single node, without its descendants.
///
/// - The node kind must be in [`ALLOWED_NODE_KINDS`].
/// - A name must be in the name table.
/// - A call target must be a plain name bound to a function.
///
/// # Errors
/// A `DisallowedConstruct` describing the violation.
pub fn check_node(node: &Expr) -> Result<(), DisallowedConstruct> {
    let kind = node.kind();
    if !ALLOWED_NODE_KINDS.contains(&kind) {
        return Err(DisallowedConstruct::Node { kind,
                                               column: node.column() });
    }

    match node {
        Expr::Name { name, column } if lookup(name).is_none() => {
            Err(DisallowedConstruct::UnknownName { name:   name.clone(),
                                                   column: *column, })
        },
        Expr::Call { function, column, .. } => resolve_call_target(function, *column).map(|_| ()),
        _ => Ok(()),
    }
}

/// Resolves the target of a call to a function of the name table.
///
/// # Parameters
/// - `function`: The call target expression.
/// - `column`: Column of the call.
///
/// # Returns
/// The function's name, arity and implementation.
///
/// # Errors
/// `DisallowedConstruct::Call` when the target is computed, is an attribute,
/// is a constant, or is not in the table.
pub fn resolve_call_target(function: &Expr,
                           column: usize)
                           -> Result<(&str, Arity, BuiltinFn), DisallowedConstruct> {
    let target = match function {
        Expr::Name { name, .. } => match lookup(name) {
            Some(Binding::Function { arity, func }) => return Ok((name.as_str(), *arity, *func)),
            Some(Binding::Constant(_)) => format!("'{name}' is a constant, not a function"),
            None => format!("'{name}' is not a permitted function"),
        },
        other => format!("the call target is not a plain name ({})", other.kind()),
    };

    Err(DisallowedConstruct::Call { target,
                                    permitted: callable_names().join(", "),
                                    column })
}
