//! Evaluation result - the canonical superstructure every variant projects from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A score bounded to the unit interval `[0.0, 1.0]`.
///
/// Construction rejects anything outside the interval (and NaN), so a `Score`
/// held in an [`EvaluationResult`] is always valid.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

/// Error returned when a value does not fit in a [`Score`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("score {0} is outside [0, 1]")]
pub struct ScoreOutOfRange(pub f64);

impl Score {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;

    pub fn new(value: f64) -> Result<Self, ScoreOutOfRange> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ScoreOutOfRange(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Score {
    type Error = ScoreOutOfRange;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Overall favorability tier of an application.
///
/// Variants are declared from fully unfavorable to fully favorable, so the
/// derived ordering is the favorability ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Desfavorable,
    DesfavorableConReservas,
    FavorableConReservas,
    Favorable,
}

impl Classification {
    /// Wire labels, in favorability order.
    pub const MEMBERS: &'static [&'static str] = &[
        "DESFAVORABLE",
        "DESFAVORABLE_CON_RESERVAS",
        "FAVORABLE_CON_RESERVAS",
        "FAVORABLE",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Desfavorable => "DESFAVORABLE",
            Classification::DesfavorableConReservas => "DESFAVORABLE_CON_RESERVAS",
            Classification::FavorableConReservas => "FAVORABLE_CON_RESERVAS",
            Classification::Favorable => "FAVORABLE",
        }
    }

    /// Returns true for both favorable tiers.
    pub fn is_favorable(&self) -> bool {
        *self >= Classification::FavorableConReservas
    }

    /// Returns true for the two intermediate "with caveats" tiers.
    pub fn has_caveats(&self) -> bool {
        matches!(
            self,
            Classification::DesfavorableConReservas | Classification::FavorableConReservas
        )
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-score plus rationale for one analysis dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionAssessment {
    pub score: Score,
    pub rationale: String,
}

/// Breakdown of the evaluation across fixed analysis dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisBreakdown {
    pub debt_capacity: DimensionAssessment,
    pub employment_stability: DimensionAssessment,
    pub financial_profile: DimensionAssessment,
    pub guarantees: DimensionAssessment,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographic_scoring: Option<DimensionAssessment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_evaluation: Option<DimensionAssessment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational_risk: Option<DimensionAssessment>,
}

/// Structured evaluation of one application.
///
/// Which fields are mandatory depends on the variant that produced it; the
/// schema registry enforces that before a result is ever constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,

    #[serde(rename = "clasificacion")]
    pub classification: Classification,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisBreakdown>,

    #[serde(default)]
    pub risk_factors: Vec<String>,

    #[serde(default)]
    pub strengths: Vec<String>,

    #[serde(default)]
    pub recommendations: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executive_summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_message: Option<String>,

    pub disclaimer: String,
}

/// The three variant results produced for one application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    #[serde(rename = "evaluacion")]
    pub evaluation: EvaluationResult,

    #[serde(rename = "conclusion_ejecutiva")]
    pub executive_summary: EvaluationResult,

    #[serde(rename = "respuesta_cliente")]
    pub client_response: EvaluationResult,
}
