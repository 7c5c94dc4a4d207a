//! Extraction of the single structured payload from a generation response.

use serde_json::Value;

use super::errors::ExtractionError;
use super::tool::ToolCall;

/// Returns the arguments of the one invocation of `expected_tool`.
///
/// Anything other than exactly one call, named as requested, is an error.
/// A second call is rejected even when the first one would validate.
pub fn extract_tool_arguments(
    mut calls: Vec<ToolCall>,
    expected_tool: &str,
) -> Result<Value, ExtractionError> {
    match calls.len() {
        0 => Err(ExtractionError::NoToolCall {
            expected: expected_tool.to_string(),
        }),
        1 => {
            let call = calls.remove(0);
            if call.name() != expected_tool {
                return Err(ExtractionError::UnexpectedTool {
                    expected: expected_tool.to_string(),
                    actual: call.name().to_string(),
                });
            }
            Ok(call.into_arguments())
        }
        count => Err(ExtractionError::MultipleToolCalls {
            expected: expected_tool.to_string(),
            count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TOOL: &str = "evaluar_solicitud_hipotecaria";

    #[test]
    fn returns_arguments_of_single_matching_call() {
        let calls = vec![ToolCall::new(TOOL, json!({ "score": 0.8 }))];
        assert_eq!(extract_tool_arguments(calls, TOOL), Ok(json!({ "score": 0.8 })));
    }

    #[test]
    fn zero_calls_is_an_error() {
        let err = extract_tool_arguments(vec![], TOOL).unwrap_err();
        assert!(matches!(err, ExtractionError::NoToolCall { .. }));
    }

    #[test]
    fn two_calls_are_rejected_even_if_first_is_valid() {
        let calls = vec![
            ToolCall::new(TOOL, json!({ "score": 0.8 })),
            ToolCall::new(TOOL, json!({ "score": 0.7 })),
        ];
        let err = extract_tool_arguments(calls, TOOL).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::MultipleToolCalls {
                expected: TOOL.to_string(),
                count: 2
            }
        );
    }

    #[test]
    fn wrong_tool_name_is_rejected() {
        let calls = vec![ToolCall::new("buscar_web", json!({}))];
        let err = extract_tool_arguments(calls, TOOL).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::UnexpectedTool {
                expected: TOOL.to_string(),
                actual: "buscar_web".to_string()
            }
        );
    }
}
