//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over the ports.

pub mod evaluation;

pub use evaluation::{
    ChainSettings, EvaluateApplicationCommand, EvaluateApplicationHandler, EvaluationChain,
    GenerateReportCommand, GenerateReportHandler,
};
