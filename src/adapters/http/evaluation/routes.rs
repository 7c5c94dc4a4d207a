//! HTTP routes for evaluation endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{evaluate_application, generate_report, get_schema, EvaluationHandlers};

/// Creates the evaluation router with all endpoints.
pub fn evaluation_routes(handlers: EvaluationHandlers) -> Router {
    Router::new()
        .route("/evaluate", post(evaluate_application))
        .route("/evaluar", post(evaluate_application))
        .route("/evaluate/report", post(generate_report))
        .route("/schemas/:variant", get(get_schema))
        .with_state(handlers)
}
