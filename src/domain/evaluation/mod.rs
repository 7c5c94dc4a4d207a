//! Evaluation domain: structured outputs of the mortgage evaluator.
//!
//! - [`EvaluationResult`] - canonical result every variant projects from
//! - [`schema`] - per-variant output contracts and validation
//! - [`extract_tool_arguments`] - pulls the single payload out of a response
//! - [`InstructionSet`] - per-variant instruction text
//! - [`EvaluationError`] - the error taxonomy of an evaluation

mod context;
mod errors;
mod extraction;
mod instructions;
mod result;
pub mod schema;
mod tool;
mod variant;

pub use context::EvaluationContext;
pub use errors::{EvaluationError, ExtractionError, ValidationError, Violation};
pub use extraction::extract_tool_arguments;
pub use instructions::{follow_up, InstructionLoadError, InstructionSet};
pub use result::{
    AnalysisBreakdown, Classification, DimensionAssessment, EvaluationReport, EvaluationResult,
    Score, ScoreOutOfRange,
};
pub use tool::{ToolCall, ToolSpec};
pub use variant::{EvaluationVariant, UnknownVariant};
