//! HTTP handlers for evaluation endpoints.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::application::handlers::evaluation::{
    EvaluateApplicationCommand, EvaluateApplicationHandler, GenerateReportCommand,
    GenerateReportHandler,
};
use crate::domain::evaluation::{schema, EvaluationError, EvaluationVariant};
use crate::ports::AIError;

use super::dto::{ErrorResponse, HealthResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct EvaluationHandlers {
    evaluate_handler: Arc<EvaluateApplicationHandler>,
    report_handler: Arc<GenerateReportHandler>,
    request_timeout: Option<Duration>,
}

impl EvaluationHandlers {
    pub fn new(
        evaluate_handler: Arc<EvaluateApplicationHandler>,
        report_handler: Arc<GenerateReportHandler>,
    ) -> Self {
        Self {
            evaluate_handler,
            report_handler,
            request_timeout: None,
        }
    }

    /// Bounds each evaluation request; expiry is reported as a generation timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    async fn within_deadline<T>(
        &self,
        work: impl Future<Output = Result<T, EvaluationError>>,
    ) -> Result<T, EvaluationError> {
        let Some(limit) = self.request_timeout else {
            return work.await;
        };

        match tokio::time::timeout(limit, work).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(timeout_ms = limit.as_millis() as u64, "evaluation request timed out");
                Err(EvaluationError::Generation(AIError::Timeout {
                    timeout_secs: u32::try_from(limit.as_secs()).unwrap_or(u32::MAX),
                }))
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /evaluate (alias /evaluar) - Technical evaluation of an application
pub async fn evaluate_application(
    State(handlers): State<EvaluationHandlers>,
    body: Bytes,
) -> Response {
    let payload = match parse_payload(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    let work = handlers
        .evaluate_handler
        .handle(EvaluateApplicationCommand::new(payload));

    match handlers.within_deadline(work).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => handle_evaluation_error(e),
    }
}

/// POST /evaluate/report - Evaluation plus executive and client conclusions
pub async fn generate_report(
    State(handlers): State<EvaluationHandlers>,
    body: Bytes,
) -> Response {
    let payload = match parse_payload(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    let work = handlers
        .report_handler
        .handle(GenerateReportCommand::new(payload));

    match handlers.within_deadline(work).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => handle_evaluation_error(e),
    }
}

/// GET /schemas/:variant - JSON Schema bound to a variant's tool
pub async fn get_schema(Path(variant): Path<String>) -> Response {
    match variant.parse::<EvaluationVariant>() {
        Ok(variant) => (StatusCode::OK, Json(schema::define(variant).to_json_schema())).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, Json(ErrorResponse::new(e.to_string()))).into_response(),
    }
}

/// GET /health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

/// Reads the raw body as JSON so malformed input gets the same envelope as
/// every other client error.
fn parse_payload(body: &[u8]) -> Result<Value, Response> {
    serde_json::from_slice(body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!("invalid JSON body: {}", e))),
        )
            .into_response()
    })
}

fn handle_evaluation_error(error: EvaluationError) -> Response {
    let status = if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    if let EvaluationError::Validation(validation) = &error {
        tracing::debug!(raw_payload = %validation.raw_payload(), "rejected model payload");
    }

    (status, Json(ErrorResponse::new(error.to_string()))).into_response()
}
