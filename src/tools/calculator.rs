use serde::Deserialize;

use crate::{
    calculator,
    error::ToolError,
    tools::core::{Tool, decode_arguments},
};

#[derive(Debug, Deserialize)]
struct CalculatorArgs {
    expression: String,
}

/// The `calculator` tool.
///
/// Takes `{"expression": "..."}` and answers with the value of the
/// expression, or with `Calculator error: <reason>` when it is rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl Tool for Calculator {
    fn name(&self) -> &'static str {
        "calculator"
    }

    fn description(&self) -> &'static str {
        "Evaluate a basic math expression safely (supports +, -, *, /, **, %, floor division, \
         round, abs, min, max, and the constants pi and e)."
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "arithmetic expression, e.g. \"(2+3*4)/5\" or \"round(1.234, 2)\""
                }
            },
            "required": ["expression"]
        })
    }

    fn call(&self, arguments: &str) -> Result<String, ToolError> {
        let args: CalculatorArgs = decode_arguments(self.name(), arguments)?;
        Ok(calculator(&args.expression))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_with_the_rendered_value() {
        assert_eq!(Calculator.call(r#"{"expression": "(2+3*4)/5"}"#).unwrap(), "2.8");
    }

    #[test]
    fn rejected_expressions_are_answers_not_errors() {
        let answer = Calculator.call(r#"{"expression": "1/0"}"#).unwrap();
        assert_eq!(answer, "Calculator error: division by zero at column 2");
    }

    #[test]
    fn missing_expression_is_an_argument_error() {
        assert!(matches!(Calculator.call("{}"),
                         Err(ToolError::InvalidArguments { tool: "calculator", .. })));
        assert!(matches!(Calculator.call(""), Err(ToolError::InvalidArguments { .. })));
    }
}
