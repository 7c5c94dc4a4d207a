//! EvaluateApplicationHandler - Technical evaluation of a raw application payload

use serde_json::Value;

use super::chain::EvaluationChain;
use crate::domain::evaluation::{
    EvaluationContext, EvaluationError, EvaluationResult, EvaluationVariant,
};
use crate::domain::loan::normalize_application;

/// Command carrying the payload exactly as the brokerage front-end sent it
#[derive(Debug, Clone)]
pub struct EvaluateApplicationCommand {
    pub payload: Value,
}

impl EvaluateApplicationCommand {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }
}

/// Handler for single technical evaluations
#[derive(Clone)]
pub struct EvaluateApplicationHandler {
    chain: EvaluationChain,
}

impl EvaluateApplicationHandler {
    pub fn new(chain: EvaluationChain) -> Self {
        Self { chain }
    }

    /// Normalizes the payload, then runs the evaluator variant.
    ///
    /// Input without holders or with an unparseable date is rejected before
    /// any generation call is made.
    pub async fn handle(
        &self,
        cmd: EvaluateApplicationCommand,
    ) -> Result<EvaluationResult, EvaluationError> {
        let application = normalize_application(cmd.payload)?;
        let context = EvaluationContext::new(&application);

        tracing::debug!(holders = application.holders().len(), "evaluating application");

        self.chain
            .evaluate(EvaluationVariant::Evaluator, &context)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::evaluation::InstructionSet;
    use serde_json::json;
    use std::sync::Arc;

    fn handler(mock: &MockAIProvider) -> EvaluateApplicationHandler {
        let chain = EvaluationChain::new(Arc::new(mock.clone()), InstructionSet::default());
        EvaluateApplicationHandler::new(chain)
    }

    #[tokio::test]
    async fn unparseable_birth_date_never_reaches_the_provider() {
        let mock = MockAIProvider::new();
        let payload = json!({
            "titulares": [{ "datos_personales": { "FECHA_NACIMIENTO": "ayer por la tarde" } }],
            "solicitud": {}
        });

        let err = handler(&mock)
            .handle(EvaluateApplicationCommand::new(payload))
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(err.kind(), "input_normalization");
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn application_without_holders_is_rejected() {
        let mock = MockAIProvider::new();

        let err = handler(&mock)
            .handle(EvaluateApplicationCommand::new(json!({ "titulares": [], "solicitud": {} })))
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn normalized_dates_are_sent_to_the_model() {
        let mock = MockAIProvider::new();
        let payload = json!({
            "titulares": [{ "datos_personales": { "FECHA_NACIMIENTO": "15/03/1985" } }],
            "solicitud": { "importe": 150000 }
        });

        // The default mock reply has no tool call; only the request matters here.
        let _ = handler(&mock)
            .handle(EvaluateApplicationCommand::new(payload))
            .await;

        let calls = mock.get_calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].messages[0].content.contains("1985-03-15"));
    }

    #[tokio::test]
    async fn loosely_typed_application_reaches_the_model_intact() {
        let mock = MockAIProvider::new();
        let payload = json!({
            "titulares": [{
                "datos_personales": {
                    "SEXO_BIOLOGICO": "hombre",
                    "HIJOS": 2.0,
                    "ANTIGUEDAD_LABORAL": "6 años"
                },
                "garantias": [{ "TIPO": "Vehiculo", "MONTO": 12000 }]
            }],
            "solicitud": { "anios": 25.5 },
            "notas": "Cliente recomendado"
        });

        let err = handler(&mock)
            .handle(EvaluateApplicationCommand::new(payload))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "extraction");
        let prompt = &mock.get_calls()[0].messages[0].content;
        for fragment in ["\"hombre\"", "2.0", "\"Vehiculo\"", "25.5", "ANTIGUEDAD_LABORAL", "notas"] {
            assert!(prompt.contains(fragment), "prompt lost {fragment}");
        }
    }
}
