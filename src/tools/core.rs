use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    error::ToolError,
    tools::{
        calculator::Calculator,
        faq::FaqLookup,
        retail::{inventory::InventoryStatus, pricing::PriceOptimizer, report::MarkdownReport},
    },
};

/// A named function an agent runtime can call with JSON arguments.
///
/// Implementations are stateless or read-only, so one instance can serve
/// calls from several threads.
pub trait Tool: Send + Sync {
    /// The name the tool is called by.
    fn name(&self) -> &'static str;

    /// What the tool does, for the model choosing among tools.
    fn description(&self) -> &'static str;

    /// JSON schema of the arguments object.
    fn parameters(&self) -> serde_json::Value;

    /// Runs the tool.
    ///
    /// `arguments` is a JSON object encoded as a string; an empty string is
    /// treated as `{}`.
    fn call(&self, arguments: &str) -> Result<String, ToolError>;

    /// Describes the tool for an agent runtime.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(self.parameters())
    }
}

/// Description of a tool as advertised to a model.
///
/// Serializes to the `{"name", "description", "parameters"}` object that
/// function-calling APIs expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The name the tool is called by.
    pub name:        String,
    /// What the tool does.
    pub description: String,
    /// JSON schema of the arguments object.
    pub parameters:  serde_json::Value,
}

impl ToolDefinition {
    /// Creates a definition for a tool that takes no arguments.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name:        name.into(),
               description: description.into(),
               parameters:  serde_json::json!({ "type": "object", "properties": {} }), }
    }

    /// Replaces the arguments schema.
    #[must_use]
    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = parameters;
        self
    }
}

/// A request to run a tool, as produced by a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// The tool to run.
    pub name:      String,
    /// The arguments, a JSON object encoded as a string.
    pub arguments: String,
}

impl ToolCall {
    /// Creates a call of tool `name`.
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self { name:      name.into(),
               arguments: arguments.into(), }
    }

    /// Decodes the arguments into `T`, reading blank text as `{}`.
    ///
    /// # Errors
    /// The `serde_json` error when the text is not JSON of the shape of `T`.
    pub fn parse_arguments<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        parse_arguments(&self.arguments)
    }
}

/// Decodes a JSON arguments object, treating blank text as `{}`.
pub fn parse_arguments<T: DeserializeOwned>(arguments: &str) -> Result<T, serde_json::Error> {
    if arguments.trim().is_empty() {
        return serde_json::from_str("{}");
    }
    serde_json::from_str(arguments)
}

/// Decodes the arguments of `tool`, wrapping failures in a `ToolError`.
pub(crate) fn decode_arguments<T: DeserializeOwned>(tool: &'static str,
                                                    arguments: &str)
                                                    -> Result<T, ToolError> {
    parse_arguments(arguments).map_err(|source| ToolError::InvalidArguments { tool, source })
}

/// The set of tools available to an agent.
///
/// Tools keep their registration order, which is also the order of
/// [`ToolRegistry::definitions`].
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the `calculator`, `faq_lookup` and retail
    /// tools, `faq_lookup` reading its entries from `faq_path`.
    ///
    /// # Example
    /// ```
    /// use calcguard::tools::{ToolCall, ToolRegistry};
    ///
    /// let registry = ToolRegistry::with_defaults("data/faq.json");
    /// assert_eq!(registry.names(),
    ///            vec!["calculator",
    ///                 "faq_lookup",
    ///                 "retail_inventory_status",
    ///                 "retail_price_optimize",
    ///                 "retail_markdown_report"]);
    ///
    /// let call = ToolCall::new("calculator", r#"{"expression": "2 ** 10"}"#);
    /// assert_eq!(registry.invoke(&call).unwrap(), "1024");
    /// ```
    #[must_use]
    pub fn with_defaults(faq_path: impl Into<PathBuf>) -> Self {
        let mut registry = Self::new();
        registry.register(Calculator);
        registry.register(FaqLookup::new(faq_path));
        registry.register(InventoryStatus);
        registry.register(PriceOptimizer);
        registry.register(MarkdownReport);
        registry
    }

    /// Adds a tool, replacing any tool registered under the same name.
    pub fn register(&mut self, tool: impl Tool + 'static) -> &mut Self {
        self.tools.retain(|existing| existing.name() != tool.name());
        self.tools.push(Box::new(tool));
        self
    }

    /// Looks up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(|tool| tool.as_ref())
    }

    /// The registered tool names, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    /// Descriptions of all registered tools.
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|tool| tool.definition()).collect()
    }

    /// Runs the tool named by `call`.
    ///
    /// # Errors
    /// `ToolError::UnknownTool` if no such tool is registered, otherwise
    /// whatever the tool reports.
    pub fn invoke(&self, call: &ToolCall) -> Result<String, ToolError> {
        let tool = self.get(&call.name)
                       .ok_or_else(|| ToolError::UnknownTool { name: call.name.clone() })?;
        debug!("invoking tool '{}' with {}", call.name, call.arguments);
        tool.call(&call.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_serialize_as_function_calling_objects() {
        let definition = ToolDefinition::new("noop", "Does nothing.");
        assert_eq!(serde_json::to_value(&definition).unwrap(),
                   serde_json::json!({
                       "name": "noop",
                       "description": "Does nothing.",
                       "parameters": { "type": "object", "properties": {} }
                   }));

        let schema = serde_json::json!({ "type": "object", "required": ["x"] });
        assert_eq!(definition.with_parameters(schema.clone()).parameters, schema);
    }

    #[test]
    fn tool_calls_decode_from_model_output() {
        let call: ToolCall =
            serde_json::from_str(r#"{"name": "calculator", "arguments": "{\"expression\": \"1+1\"}"}"#).unwrap();
        assert_eq!(call, ToolCall::new("calculator", r#"{"expression": "1+1"}"#));
    }
}
