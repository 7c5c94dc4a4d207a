//! HTTP DTOs for evaluation endpoints.
//!
//! Successful responses serialize domain results directly; their wire shape
//! is the public contract consumed by the brokerage UI.

use serde::{Deserialize, Serialize};

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Liveness check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_envelope_has_single_error_key() {
        let body = serde_json::to_value(ErrorResponse::new("boom")).unwrap();
        assert_eq!(body, json!({ "error": "boom" }));
    }

    #[test]
    fn health_reports_ok() {
        let body = serde_json::to_value(HealthResponse::ok()).unwrap();
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
