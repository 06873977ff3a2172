//! # calcguard
//!
//! calcguard evaluates untrusted arithmetic expressions written in a small,
//! Python-like syntax. Expressions are parsed into a syntax tree, checked in
//! full against a fixed allow-list of node kinds and names, and only then
//! evaluated. Nothing outside the allow-list ever runs.
//!
//! The evaluator is also exposed as an agent tool named `calculator`, next to
//! a keyword-overlap `faq_lookup` tool and a few retail tools; see [`tools`].

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use log::debug;

use crate::{
    error::Rejection,
    interpreter::{
        evaluator::core::Evaluator, parser::core::parse, validator::validate, value::core::Value,
    },
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of an expression as a tree. The tree is built by the
/// parser, checked by the validator and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines node types for every construct the parser recognizes.
/// - Attaches source columns to nodes for error reporting.
/// - Classifies nodes into node kinds and walks the tree in pre-order.
pub mod ast;
/// Provides unified error types for parsing, validation and evaluation.
///
/// # Responsibilities
/// - Defines error enums for all failure modes.
/// - Attaches columns and detailed messages for context.
/// - Unifies them in `Rejection`, so that callers can tell the classes apart.
pub mod error;
/// Orchestrates parsing, validation and evaluation.
///
/// This module ties together the lexer, parser, validator, evaluator and
/// value types.
pub mod interpreter;
/// Agent tools.
///
/// Tools are named, schema-described functions an agent runtime can call
/// with JSON arguments. This module defines the `Tool` trait, a registry, and
/// the `calculator`, `faq_lookup` and retail tools.
pub mod tools;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64`, `u32`, `i32` and `f64` without silent data
///   loss.
pub mod util;

/// Evaluates an arithmetic expression.
///
/// The text is parsed, the whole tree is validated against the allow-list,
/// and only then evaluated. Evaluation has no side effects, so evaluating the
/// same text twice gives the same result.
///
/// # Errors
/// A [`Rejection`] describing why the expression has no value: a syntax
/// error, a disallowed construct, or an arithmetic error.
///
/// # Examples
/// ```
/// use calcguard::{error::Rejection, evaluate, interpreter::value::core::Value};
///
/// assert_eq!(evaluate("(2+3*4)/5").unwrap(), Value::Real(2.8));
/// assert_eq!(evaluate("round(2.5)").unwrap(), Value::Integer(2));
///
/// assert!(matches!(evaluate("os.system('x')"), Err(Rejection::Disallowed(_))));
/// assert!(matches!(evaluate("1/0"), Err(Rejection::Arithmetic(_))));
/// assert!(matches!(evaluate(""), Err(Rejection::Parse(_))));
/// ```
pub fn evaluate(expression: &str) -> Result<Value, Rejection> {
    let tree = parse(expression)?;
    debug!("parsed {expression:?} into a {} node", tree.kind());

    validate(&tree)?;

    let value = Evaluator::new().eval(&tree)?;
    debug!("{expression:?} = {value}");
    Ok(value)
}

/// Evaluates an expression and renders the outcome as text.
///
/// Returns the rendered value, or `"Calculator error: <reason>"` if the
/// expression is rejected. This never fails.
///
/// # Examples
/// ```
/// use calcguard::calculator;
///
/// assert_eq!(calculator("(2+3*4)/5"), "2.8");
/// assert_eq!(calculator("round(1.005, 2)"), "1.0");
/// assert!(calculator("__import__('os')").starts_with("Calculator error: "));
/// ```
#[must_use]
pub fn calculator(expression: &str) -> String {
    match evaluate(expression) {
        Ok(value) => value.to_string(),
        Err(e) => format!("Calculator error: {e}"),
    }
}
