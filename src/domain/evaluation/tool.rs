//! Tool specification and tool invocation value objects.
//!
//! Structured output is obtained by forcing the model to invoke a single
//! named tool whose parameter schema is the variant's result schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Definition of the tool offered to the model.
///
/// # Examples
///
/// ```ignore
/// let spec = ToolSpec::new(
///     "evaluar_solicitud_hipotecaria",
///     "Registra la evaluación técnica de la solicitud",
///     serde_json::json!({ "type": "object", "properties": {} }),
/// );
/// assert_eq!(spec.to_anthropic_format()["input_schema"]["type"], "object");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Unique name of the tool.
    name: String,

    /// Human-readable description sent to the model.
    description: String,

    /// JSON Schema for the tool arguments.
    input_schema: Value,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn input_schema(&self) -> &Value {
        &self.input_schema
    }

    /// Converts to OpenAI function-tool format.
    pub fn to_openai_format(&self) -> Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.input_schema
            }
        })
    }

    /// Converts to Anthropic tool format.
    pub fn to_anthropic_format(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "input_schema": self.input_schema
        })
    }
}

/// A tool invocation returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned invocation id, when the provider supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    /// Name of the invoked tool.
    name: String,

    /// Arguments as produced by the model, unvalidated.
    arguments: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: None,
            name: name.into(),
            arguments,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &Value {
        &self.arguments
    }

    /// Consumes self and returns the arguments.
    pub fn into_arguments(self) -> Value {
        self.arguments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_schema() -> Value {
        json!({
            "type": "object",
            "required": ["score"],
            "properties": { "score": { "type": "number" } }
        })
    }

    #[test]
    fn to_openai_format_has_correct_structure() {
        let spec = ToolSpec::new("evaluar", "Evalúa", sample_schema());
        let openai = spec.to_openai_format();

        assert_eq!(openai["type"], "function");
        assert_eq!(openai["function"]["name"], "evaluar");
        assert_eq!(openai["function"]["description"], "Evalúa");
        assert_eq!(openai["function"]["parameters"]["required"], json!(["score"]));
    }

    #[test]
    fn to_anthropic_format_has_correct_structure() {
        let spec = ToolSpec::new("evaluar", "Evalúa", sample_schema());
        let anthropic = spec.to_anthropic_format();

        assert_eq!(anthropic["name"], "evaluar");
        assert_eq!(anthropic["description"], "Evalúa");
        assert!(anthropic["input_schema"].is_object());
    }

    #[test]
    fn tool_call_keeps_arguments_untouched() {
        let call = ToolCall::new("evaluar", json!({ "score": "0.8" })).with_id("toolu_01");

        assert_eq!(call.id(), Some("toolu_01"));
        assert_eq!(call.name(), "evaluar");
        assert_eq!(call.arguments()["score"], "0.8");
        assert_eq!(call.into_arguments(), json!({ "score": "0.8" }));
    }
}
