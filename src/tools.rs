/// The `Tool` trait, tool descriptions and the registry.
pub mod core;

/// The `calculator` tool.
///
/// Evaluates an arithmetic expression and returns the rendered result or the
/// reason it was rejected.
pub mod calculator;

/// The `faq_lookup` tool.
///
/// Answers a question with the best keyword-overlap match from a JSON FAQ
/// file.
pub mod faq;

/// Retail tools: low-stock filtering, price optimization and a markdown
/// report of the findings.
///
/// The inventory and findings arrive in the JSON arguments, so the tools
/// need no data files.
pub mod retail;

pub use self::core::{Tool, ToolCall, ToolDefinition, ToolRegistry};
