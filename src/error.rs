/// Evaluation errors.
///
/// Errors raised while computing the value of an already validated
/// expression: division by zero, overflow, domain and type errors, and wrong
/// argument counts.
pub mod arithmetic_error;
/// Allow-list violations.
///
/// Raised by the validator when a well-formed expression uses a node kind,
/// call target or name that is not permitted.
pub mod disallowed;
/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of the
/// expression text: unexpected tokens, unbalanced brackets, oversized
/// literals and inputs beyond the parser's limits.
pub mod parse_error;
/// The unified rejection type returned by [`crate::evaluate`].
pub mod rejection;
/// Tool invocation errors.
///
/// Unknown tool names, malformed JSON arguments, and FAQ files that cannot be
/// read or decoded.
pub mod tool_error;

pub use arithmetic_error::ArithmeticError;
pub use disallowed::DisallowedConstruct;
pub use parse_error::ParseError;
pub use rejection::Rejection;
pub use tool_error::ToolError;
