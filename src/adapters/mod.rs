//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - LLM provider clients (Anthropic, OpenAI, mock)
//! - `http` - axum REST API

pub mod ai;
pub mod http;

pub use ai::build_provider;
pub use http::app_router;
