//! Loan application as received from the brokerage.
//!
//! Wire names follow the front-end payload (Spanish keys). The core only
//! insists on the outer shape: a JSON object with a non-empty `titulares`
//! array. Everything inside a holder or the loan request is forwarded to the
//! model as sent, unknown fields included, because the model reasons around
//! missing or unusual data and the core does not.

use serde::Serialize;
use serde_json::{Map, Value};

pub const HOLDERS_KEY: &str = "titulares";
pub const PERSONAL_KEY: &str = "datos_personales";
pub const LOAN_REQUEST_KEY: &str = "solicitud";
pub const BIRTH_DATE_KEY: &str = "FECHA_NACIMIENTO";

/// A normalized mortgage application.
///
/// Constructed per inbound call by
/// [`normalize_application`](super::normalize_application), consumed once by
/// the evaluation chain and then discarded. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ApplicationRequest {
    payload: Map<String, Value>,
}

impl ApplicationRequest {
    /// Wraps a payload whose outer shape has already been checked.
    pub(super) fn from_checked(payload: Map<String, Value>) -> Self {
        Self { payload }
    }

    /// Applicant and co-applicants, in the order they were submitted.
    pub fn holders(&self) -> &[Value] {
        match self.payload.get(HOLDERS_KEY) {
            Some(Value::Array(holders)) => holders,
            _ => &[],
        }
    }

    /// The `solicitud` block, when present.
    pub fn loan_request(&self) -> Option<&Value> {
        self.payload.get(LOAN_REQUEST_KEY).filter(|value| !value.is_null())
    }

    /// Pretty-printed JSON, as placed in the opening prompt turn.
    pub fn to_prompt_json(&self) -> String {
        format!("{:#}", Value::Object(self.payload.clone()))
    }
}
