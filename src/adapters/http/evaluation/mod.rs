//! HTTP adapter for evaluation endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse};
pub use handlers::{health, EvaluationHandlers};
pub use routes::evaluation_routes;
