/// Parser entry point and the lowest precedence levels.
///
/// Tokenizes the source, enforces the size and nesting limits, and parses
/// tuples, lambdas, assignment expressions and conditional expressions.
pub mod core;

/// Binary operator parsing.
///
/// Implements the precedence ladder from `or` down to `**`, including
/// chained comparisons.
pub mod binary;

/// Unary, postfix and atom parsing.
///
/// Handles prefix operators, calls, subscripts, attribute access, literals
/// and bracketed displays.
pub mod unary;

/// Shared parser helpers.
///
/// Comma-separated lists, identifiers, expected tokens and comprehension
/// clauses.
pub mod utils;
