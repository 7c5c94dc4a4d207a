//! Validation of candidate payloads against a schema descriptor.
//!
//! Checks run depth-first in declaration order and stop at the first
//! violation. Values are never coerced. Fields the descriptor does not
//! declare are dropped before the payload is decoded.

use serde_json::{Map, Value};

use crate::domain::evaluation::errors::{ValidationError, Violation};
use crate::domain::evaluation::result::EvaluationResult;
use crate::domain::json::{join_path, kind_of};

use super::descriptor::{FieldKind, ObjectSchema, SchemaDescriptor};

/// Path reported for violations at the payload root.
pub const ROOT_PATH: &str = "$";

/// Validates `candidate` against `descriptor` and decodes it.
pub fn validate(
    descriptor: &SchemaDescriptor,
    candidate: &Value,
) -> Result<EvaluationResult, ValidationError> {
    let fail = |path: String, violation: Violation| {
        ValidationError::new(path, violation, candidate.clone())
    };

    let Some(root) = candidate.as_object() else {
        return Err(fail(
            ROOT_PATH.to_string(),
            Violation::InvalidType {
                expected: "object",
                actual: kind_of(candidate),
            },
        ));
    };

    let projected = check_object(descriptor.root(), root, "").map_err(|(p, v)| fail(p, v))?;

    serde_json::from_value(Value::Object(projected))
        .map_err(|e| fail(ROOT_PATH.to_string(), Violation::Decode(e.to_string())))
}

type Failure = (String, Violation);

fn check_object(
    schema: &ObjectSchema,
    object: &Map<String, Value>,
    path: &str,
) -> Result<Map<String, Value>, Failure> {
    let mut projected = Map::new();

    for field in schema.fields() {
        let field_path = join_path(path, field.name());
        match object.get(field.name()) {
            None | Some(Value::Null) => {
                if field.is_required() {
                    return Err((field_path, Violation::MissingRequired));
                }
            }
            Some(value) => {
                let checked = check_value(field.kind(), value, &field_path)?;
                projected.insert(field.name().to_string(), checked);
            }
        }
    }

    Ok(projected)
}

fn check_value(kind: &FieldKind, value: &Value, path: &str) -> Result<Value, Failure> {
    let type_mismatch = || {
        (
            path.to_string(),
            Violation::InvalidType {
                expected: kind.json_type(),
                actual: kind_of(value),
            },
        )
    };

    match kind {
        FieldKind::Number { min, max } => {
            let number = value.as_f64().ok_or_else(type_mismatch)?;
            if number < *min || number > *max {
                return Err((
                    path.to_string(),
                    Violation::OutOfRange {
                        value: number,
                        min: *min,
                        max: *max,
                    },
                ));
            }
            Ok(value.clone())
        }
        FieldKind::Text => {
            value.as_str().ok_or_else(type_mismatch)?;
            Ok(value.clone())
        }
        FieldKind::Enum(members) => {
            let text = value.as_str().ok_or_else(type_mismatch)?;
            if !members.iter().any(|member| *member == text) {
                return Err((
                    path.to_string(),
                    Violation::NotAMember {
                        value: text.to_string(),
                        members: *members,
                    },
                ));
            }
            Ok(value.clone())
        }
        FieldKind::List(item) => {
            let items = value.as_array().ok_or_else(type_mismatch)?;
            items
                .iter()
                .enumerate()
                .map(|(i, element)| check_value(item, element, &format!("{}[{}]", path, i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        FieldKind::Object(schema) => {
            let object = value.as_object().ok_or_else(type_mismatch)?;
            check_object(schema, object, path).map(Value::Object)
        }
    }
}
