//! Evaluation variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which evaluation is being produced.
///
/// Each variant has its own instruction text, its own schema projection of
/// [`EvaluationResult`](super::EvaluationResult) and its own forced tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationVariant {
    /// Technical risk evaluation for the lending institution.
    Evaluator,
    /// Executive summary of a technical evaluation.
    ExecutiveSummary,
    /// Empathetic response addressed to the client.
    ClientResponse,
}

impl EvaluationVariant {
    pub const ALL: [EvaluationVariant; 3] = [
        EvaluationVariant::Evaluator,
        EvaluationVariant::ExecutiveSummary,
        EvaluationVariant::ClientResponse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationVariant::Evaluator => "evaluator",
            EvaluationVariant::ExecutiveSummary => "executive_summary",
            EvaluationVariant::ClientResponse => "client_response",
        }
    }

    /// Name of the tool the model is forced to invoke for this variant.
    pub fn tool_name(&self) -> &'static str {
        match self {
            EvaluationVariant::Evaluator => "evaluar_solicitud_hipotecaria",
            EvaluationVariant::ExecutiveSummary => "redactar_conclusion_ejecutiva",
            EvaluationVariant::ClientResponse => "redactar_respuesta_cliente",
        }
    }
}

impl fmt::Display for EvaluationVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown evaluation variant: {0}")]
pub struct UnknownVariant(pub String);

impl FromStr for EvaluationVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "evaluator" => Ok(EvaluationVariant::Evaluator),
            "executive_summary" => Ok(EvaluationVariant::ExecutiveSummary),
            "client_response" => Ok(EvaluationVariant::ClientResponse),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}
