//! Mortgage Evaluator - Schema-validated LLM evaluation of mortgage applications
//!
//! Applicant data is sent to a language model under a forced tool call whose
//! parameter schema describes the expected evaluation. The single tool
//! invocation in the reply is extracted and validated against the same
//! schema before a typed `EvaluationResult` is returned.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
