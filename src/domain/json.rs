//! Small helpers over `serde_json::Value` shared by the domain modules.

use serde_json::Value;

/// Returns the JSON type name of a value, as used in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Joins a parent path and a field name into a dotted path.
pub fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", parent, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_of_names_every_json_type() {
        assert_eq!(kind_of(&json!(null)), "null");
        assert_eq!(kind_of(&json!(true)), "boolean");
        assert_eq!(kind_of(&json!(0.8)), "number");
        assert_eq!(kind_of(&json!("0.8")), "string");
        assert_eq!(kind_of(&json!([])), "array");
        assert_eq!(kind_of(&json!({})), "object");
    }

    #[test]
    fn join_path_skips_empty_parent() {
        assert_eq!(join_path("", "score"), "score");
        assert_eq!(join_path("analysis.debt_capacity", "score"), "analysis.debt_capacity.score");
    }
}
