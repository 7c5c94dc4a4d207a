//! Evaluation error taxonomy.
//!
//! Every failure of the evaluation pipeline surfaces as one of four distinct
//! kinds. None of them is recovered or retried inside the core.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::domain::loan::InputNormalizationError;
use crate::ports::AIError;

/// A single structural violation found while validating a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// A required field is absent (or null).
    MissingRequired,
    /// The value has the wrong JSON type. No coercion is attempted.
    InvalidType {
        expected: &'static str,
        actual: &'static str,
    },
    /// A number lies outside its declared inclusive bounds.
    OutOfRange { value: f64, min: f64, max: f64 },
    /// A string is not one of the declared enumeration members.
    NotAMember {
        value: String,
        members: &'static [&'static str],
    },
    /// The payload passed structural checks but could not be decoded.
    Decode(String),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingRequired => write!(f, "required field missing"),
            Violation::InvalidType { expected, actual } => {
                write!(f, "expected {}, got {}", expected, actual)
            }
            Violation::OutOfRange { value, min, max } => {
                write!(f, "expected number in [{},{}], got {}", min, max, value)
            }
            Violation::NotAMember { value, members } => {
                write!(f, "expected one of {}, got '{}'", members.join(" | "), value)
            }
            Violation::Decode(message) => write!(f, "undecodable payload: {}", message),
        }
    }
}

/// Structured output failed validation against its schema.
///
/// Carries the path of the first offending field and the raw payload as the
/// model produced it. The payload is never repaired.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{path}: {violation}")]
pub struct ValidationError {
    path: String,
    violation: Violation,
    raw_payload: Value,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, violation: Violation, raw_payload: Value) -> Self {
        Self {
            path: path.into(),
            violation,
            raw_payload,
        }
    }

    /// Path-qualified location, e.g. `analysis.debt_capacity.score`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn violation(&self) -> &Violation {
        &self.violation
    }

    /// The payload exactly as extracted from the model response.
    pub fn raw_payload(&self) -> &Value {
        &self.raw_payload
    }
}

/// The generation response broke the forced-tool protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("expected one invocation of '{expected}', got none")]
    NoToolCall { expected: String },

    #[error("expected one invocation of '{expected}', got {count}")]
    MultipleToolCalls { expected: String, count: usize },

    #[error("expected invocation of '{expected}', got '{actual}'")]
    UnexpectedTool { expected: String, actual: String },
}

/// Failure of an `evaluate` call.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("generation failed: {0}")]
    Generation(#[from] AIError),

    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid application: {0}")]
    InputNormalization(#[from] InputNormalizationError),
}

impl EvaluationError {
    /// Stable label of the error kind, for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            EvaluationError::Generation(_) => "generation",
            EvaluationError::Extraction(_) => "extraction",
            EvaluationError::Validation(_) => "validation",
            EvaluationError::InputNormalization(_) => "input_normalization",
        }
    }

    /// Returns true when the caller, not the pipeline, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, EvaluationError::InputNormalization(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn out_of_range_message_is_path_qualified() {
        let err = ValidationError::new(
            "analysis.debt_capacity.score",
            Violation::OutOfRange {
                value: 1.4,
                min: 0.0,
                max: 1.0,
            },
            json!({}),
        );
        assert_eq!(
            err.to_string(),
            "analysis.debt_capacity.score: expected number in [0,1], got 1.4"
        );
    }

    #[test]
    fn missing_required_names_field() {
        let err = ValidationError::new("clasificacion", Violation::MissingRequired, json!({}));
        assert_eq!(err.to_string(), "clasificacion: required field missing");
        assert_eq!(err.path(), "clasificacion");
    }

    #[test]
    fn not_a_member_lists_members() {
        let err = ValidationError::new(
            "clasificacion",
            Violation::NotAMember {
                value: "MUY_FAVORABLE".to_string(),
                members: &["DESFAVORABLE", "FAVORABLE"],
            },
            json!({}),
        );
        assert_eq!(
            err.to_string(),
            "clasificacion: expected one of DESFAVORABLE | FAVORABLE, got 'MUY_FAVORABLE'"
        );
    }

    #[test]
    fn raw_payload_is_preserved() {
        let raw = json!({ "score": "0.8" });
        let err = ValidationError::new(
            "score",
            Violation::InvalidType {
                expected: "number",
                actual: "string",
            },
            raw.clone(),
        );
        assert_eq!(err.raw_payload(), &raw);
        assert_eq!(err.to_string(), "score: expected number, got string");
    }

    #[test]
    fn extraction_errors_display() {
        let none = ExtractionError::NoToolCall {
            expected: "evaluar".to_string(),
        };
        assert_eq!(none.to_string(), "expected one invocation of 'evaluar', got none");

        let many = ExtractionError::MultipleToolCalls {
            expected: "evaluar".to_string(),
            count: 2,
        };
        assert_eq!(many.to_string(), "expected one invocation of 'evaluar', got 2");
    }

    #[test]
    fn evaluation_error_kinds_are_distinct() {
        let generation: EvaluationError = AIError::network("down").into();
        let extraction: EvaluationError = ExtractionError::NoToolCall {
            expected: "x".to_string(),
        }
        .into();
        let validation: EvaluationError =
            ValidationError::new("score", Violation::MissingRequired, json!({})).into();
        let input: EvaluationError = InputNormalizationError::NoHolders.into();

        assert_eq!(generation.kind(), "generation");
        assert_eq!(extraction.kind(), "extraction");
        assert_eq!(validation.kind(), "validation");
        assert_eq!(input.kind(), "input_normalization");

        assert!(input.is_client_error());
        assert!(!validation.is_client_error());
    }
}
