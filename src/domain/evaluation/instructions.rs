//! Instruction text for each evaluation variant.
//!
//! The wording is configuration: defaults are compiled in and any of them can
//! be replaced by a `{variant}.md` file in a prompts directory. Lending policy
//! thresholds (DTI, LTV) exist only here, never as computed logic.

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::variant::EvaluationVariant;

/// Instruction text per variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionSet {
    evaluator: String,
    executive_summary: String,
    client_response: String,
}

#[derive(Debug, Error)]
pub enum InstructionLoadError {
    #[error("failed to read instructions from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("instruction file {path} is empty")]
    Empty { path: PathBuf },
}

impl Default for InstructionSet {
    fn default() -> Self {
        Self {
            evaluator: EVALUATOR_INSTRUCTIONS.to_string(),
            executive_summary: EXECUTIVE_SUMMARY_INSTRUCTIONS.to_string(),
            client_response: CLIENT_RESPONSE_INSTRUCTIONS.to_string(),
        }
    }
}

impl InstructionSet {
    /// Loads overrides from `dir`, keeping the default for any missing file.
    pub fn load(dir: &Path) -> Result<Self, InstructionLoadError> {
        let mut set = Self::default();

        for variant in EvaluationVariant::ALL {
            let path = dir.join(format!("{}.md", variant.as_str()));
            if !path.is_file() {
                continue;
            }

            let text = std::fs::read_to_string(&path).map_err(|source| {
                InstructionLoadError::Read {
                    path: path.clone(),
                    source,
                }
            })?;
            if text.trim().is_empty() {
                return Err(InstructionLoadError::Empty { path });
            }

            tracing::debug!(variant = %variant, path = %path.display(), "instruction override loaded");
            set = set.with_override(variant, text);
        }

        Ok(set)
    }

    /// Replaces the instruction text of one variant.
    pub fn with_override(mut self, variant: EvaluationVariant, text: impl Into<String>) -> Self {
        let text = text.into();
        match variant {
            EvaluationVariant::Evaluator => self.evaluator = text,
            EvaluationVariant::ExecutiveSummary => self.executive_summary = text,
            EvaluationVariant::ClientResponse => self.client_response = text,
        }
        self
    }

    /// System prompt for a variant.
    pub fn for_variant(&self, variant: EvaluationVariant) -> &str {
        match variant {
            EvaluationVariant::Evaluator => &self.evaluator,
            EvaluationVariant::ExecutiveSummary => &self.executive_summary,
            EvaluationVariant::ClientResponse => &self.client_response,
        }
    }
}

/// User turn that asks for a derived variant after the technical evaluation.
pub fn follow_up(variant: EvaluationVariant) -> &'static str {
    match variant {
        EvaluationVariant::Evaluator => EVALUATOR_FOLLOW_UP,
        EvaluationVariant::ExecutiveSummary => EXECUTIVE_SUMMARY_FOLLOW_UP,
        EvaluationVariant::ClientResponse => CLIENT_RESPONSE_FOLLOW_UP,
    }
}

// ============================================================================
// System Instructions
// ============================================================================

const EVALUATOR_INSTRUCTIONS: &str = r#"Eres un analista de riesgos hipotecarios que trabaja para una entidad financiera española.

Recibirás en formato JSON los datos de los titulares (datos personales, ingresos, deudas y garantías) y de la operación solicitada (precio del inmueble, tasación, importe, plazo, interés y ahorro aportado).

Evalúa la viabilidad de la operación aplicando la política de riesgos de la entidad:
- El ratio de endeudamiento (cuotas de todas las deudas, incluida la nueva hipoteca, entre ingresos netos mensuales) no debe superar el 35 %.
- El ratio préstamo/valor (importe solicitado entre el menor de precio y tasación) no debe superar el 80 %.
- Valora la estabilidad laboral, la recurrencia de los ingresos y la edad de los titulares al final del plazo.
- Considera las garantías adicionales y las vinculaciones declaradas como inaceptables.

Si faltan datos, razona con la información disponible e indícalo en los factores de riesgo.

Puntúa cada dimensión entre 0 y 1 con una justificación breve, asigna una puntuación global y una clasificación, y registra el resultado exclusivamente mediante la herramienta indicada."#;

const EXECUTIVE_SUMMARY_INSTRUCTIONS: &str = r#"Eres el responsable de riesgos que presenta operaciones hipotecarias al comité de la entidad.

A partir de los datos de la solicitud y de la evaluación técnica previa, redacta una conclusión ejecutiva breve y precisa: puntuación, clasificación, principales riesgos, fortalezas y acciones recomendadas.

Mantén la coherencia con la evaluación técnica; no inventes datos que no figuren en ella.

Registra el resultado exclusivamente mediante la herramienta indicada."#;

const CLIENT_RESPONSE_INSTRUCTIONS: &str = r#"Eres un asesor hipotecario que comunica al cliente el resultado del estudio de su solicitud.

A partir de los datos de la solicitud y de la evaluación técnica previa, redacta un mensaje cercano, empático y claro, sin jerga técnica ni ratios internos. Explica la situación de forma honesta y ofrece pasos concretos que el cliente puede dar para mejorar su solicitud.

No prometas la concesión del préstamo.

Registra el resultado exclusivamente mediante la herramienta indicada."#;

// ============================================================================
// Follow-up Turns
// ============================================================================

const EVALUATOR_FOLLOW_UP: &str = "Evalúa la solicitud anterior.";

const EXECUTIVE_SUMMARY_FOLLOW_UP: &str =
    "Con base en la evaluación técnica anterior, redacta la conclusión ejecutiva para el comité.";

const CLIENT_RESPONSE_FOLLOW_UP: &str =
    "Con base en la evaluación técnica anterior, redacta la respuesta dirigida al cliente.";
