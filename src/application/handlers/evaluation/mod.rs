//! Evaluation handlers.
//!
//! - `EvaluationChain` runs one variant end to end against the AI provider
//! - `EvaluateApplicationHandler` serves single technical evaluations
//! - `GenerateReportHandler` builds the three-part report

mod chain;
mod evaluate_application;
mod generate_report;

pub use chain::{ChainSettings, EvaluationChain};
pub use evaluate_application::{EvaluateApplicationCommand, EvaluateApplicationHandler};
pub use generate_report::{GenerateReportCommand, GenerateReportHandler};
