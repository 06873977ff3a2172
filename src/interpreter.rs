/// The evaluator module computes the value of a validated syntax tree.
///
/// The evaluator traverses the tree and performs the permitted arithmetic
/// operations, resolving names and calls through the static name table.
///
/// # Responsibilities
/// - Evaluates literals, constants, `+ - * / // % **`, unary `+ -` and calls.
/// - Keeps integer arithmetic exact and checked, promoting to reals on demand.
/// - Reports arithmetic errors such as division by zero or overflow.
pub mod evaluator;
/// The lexer module tokenizes expression text for further parsing.
///
/// The lexer reads the raw text and produces a stream of tokens, each
/// corresponding to a number, string, identifier, keyword, operator or
/// delimiter. This is the first stage of evaluation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with their column.
/// - Refuses numeric literals that do not fit their type.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// The parser accepts a wider grammar than the evaluator, so that forbidden
/// constructs produce a tree the validator can reject by name instead of a
/// syntax error.
///
/// # Responsibilities
/// - Converts tokens into structured syntax-tree nodes.
/// - Reports syntax errors with their column.
/// - Bounds the token count and nesting depth of an expression.
pub mod parser;
/// The validator module enforces the allow-list.
///
/// Walks the entire tree before evaluation and refuses any node kind, call
/// target or name that is not explicitly permitted.
pub mod validator;
/// The value module defines the numeric result type.
///
/// # Responsibilities
/// - Defines the `Value` enum with its integer and real variants.
/// - Provides promotion from integer to real and numeric ordering.
/// - Renders values as text.
pub mod value;
