//! Input normalization errors.

use thiserror::Error;

/// Caller input that cannot be coerced into the minimal shape needed to
/// build a prompt. Raised before any generation call is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputNormalizationError {
    #[error("application payload must be a JSON object, got {actual}")]
    NotAnObject { actual: &'static str },

    #[error("{field}: expected {expected}, got {actual}")]
    InvalidShape {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{field}: unparseable date '{value}'")]
    InvalidDate { field: String, value: String },

    #[error("application must include at least one holder (titulares)")]
    NoHolders,
}
