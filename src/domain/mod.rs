//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `loan` - Mortgage application input model and payload normalization
//! - `evaluation` - Evaluation results, schema registry, extraction and errors
//! - `json` - Shared helpers over `serde_json::Value`

pub mod evaluation;
pub mod json;
pub mod loan;
