//! EvaluationChain - Schema-bound generation for one evaluation variant

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::domain::evaluation::{
    extract_tool_arguments, schema, EvaluationContext, EvaluationError, EvaluationResult,
    EvaluationVariant, InstructionSet,
};
use crate::ports::{AIError, AIProvider, CompletionRequest, RequestMetadata};

/// Settings for the generation calls issued by the chain
#[derive(Debug, Clone, Copy)]
pub struct ChainSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub max_concurrent_generations: usize,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            temperature: 0.2,
            max_concurrent_generations: 8,
        }
    }
}

/// Runs prompt assembly, forced tool generation, extraction and validation.
///
/// Cloning is cheap; clones share the provider and the concurrency limit.
#[derive(Clone)]
pub struct EvaluationChain {
    provider: Arc<dyn AIProvider>,
    instructions: Arc<InstructionSet>,
    permits: Arc<Semaphore>,
    settings: ChainSettings,
}

impl EvaluationChain {
    pub fn new(provider: Arc<dyn AIProvider>, instructions: InstructionSet) -> Self {
        Self::with_settings(provider, instructions, ChainSettings::default())
    }

    pub fn with_settings(
        provider: Arc<dyn AIProvider>,
        instructions: InstructionSet,
        settings: ChainSettings,
    ) -> Self {
        Self {
            provider,
            instructions: Arc::new(instructions),
            permits: Arc::new(Semaphore::new(settings.max_concurrent_generations.max(1))),
            settings,
        }
    }

    /// Evaluates `context` under `variant`, all or nothing.
    pub async fn evaluate(
        &self,
        variant: EvaluationVariant,
        context: &EvaluationContext,
    ) -> Result<EvaluationResult, EvaluationError> {
        let started = Instant::now();
        let info = self.provider.provider_info();

        let outcome = self.run(variant, context).await;

        let duration_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            Ok(result) => tracing::info!(
                variant = variant.as_str(),
                provider = %info.name,
                model = %info.model,
                duration_ms,
                clasificacion = result.classification.as_str(),
                favorable = result.classification.is_favorable(),
                caveats = result.classification.has_caveats(),
                "evaluation completed"
            ),
            Err(err) => tracing::warn!(
                variant = variant.as_str(),
                provider = %info.name,
                model = %info.model,
                duration_ms,
                kind = err.kind(),
                error = %err,
                "evaluation failed"
            ),
        }

        outcome
    }

    async fn run(
        &self,
        variant: EvaluationVariant,
        context: &EvaluationContext,
    ) -> Result<EvaluationResult, EvaluationError> {
        let descriptor = schema::define(variant);
        let request = self.build_request(variant, context);

        let response = {
            // The limiter is never closed, so acquisition only fails on shutdown.
            let _permit = self
                .permits
                .acquire()
                .await
                .map_err(|_| AIError::unavailable("generation limiter closed"))?;
            self.provider.complete(request).await?
        };

        let arguments = extract_tool_arguments(response.tool_calls, descriptor.tool_name())?;
        let result = schema::validate(descriptor, &arguments)?;
        Ok(result)
    }

    fn build_request(
        &self,
        variant: EvaluationVariant,
        context: &EvaluationContext,
    ) -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(Uuid::new_v4(), variant.as_str()))
            .with_system_prompt(self.instructions.for_variant(variant))
            .with_messages(context.messages())
            .with_max_tokens(self.settings.max_tokens)
            .with_temperature(self.settings.temperature)
            .with_forced_tool(schema::tool_spec(variant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::evaluation::{Classification, ExtractionError};
    use crate::domain::loan::normalize_application;
    use crate::ports::{MessageRole, ToolChoice};
    use serde_json::{json, Value};
    use std::time::Duration;

    const TOOL: &str = "evaluar_solicitud_hipotecaria";

    fn context() -> EvaluationContext {
        let application = normalize_application(json!({
            "titulares": [{ "ingresos": [{ "TIPO": "Nómina", "MONTO": 5500, "PERIODO": "MENSUAL" }] }],
            "solicitud": { "importe": 150000, "anios": 25, "precio_tasacion": 175000 }
        }))
        .unwrap();
        EvaluationContext::new(&application)
    }

    fn dimension(score: f64) -> Value {
        json!({ "score": score, "rationale": "ok" })
    }

    fn evaluator_payload(score: f64) -> Value {
        json!({
            "score": score,
            "clasificacion": "FAVORABLE",
            "analysis": {
                "debt_capacity": dimension(0.8),
                "employment_stability": dimension(0.9),
                "financial_profile": dimension(0.7),
                "guarantees": dimension(0.8)
            },
            "risk_factors": [],
            "strengths": ["Ingresos estables"],
            "recommendations": ["Aprobar"],
            "disclaimer": "Evaluación orientativa."
        })
    }

    fn chain(mock: &MockAIProvider) -> EvaluationChain {
        EvaluationChain::new(Arc::new(mock.clone()), InstructionSet::default())
    }

    #[tokio::test]
    async fn returns_validated_result() {
        let mock = MockAIProvider::new()
            .with_tool_call(TOOL, evaluator_payload(0.8));

        let result = chain(&mock)
            .evaluate(EvaluationVariant::Evaluator, &context())
            .await
            .unwrap();

        assert_eq!(result.score.map(|s| s.value()), Some(0.8));
        assert_eq!(result.classification, Classification::Favorable);
    }

    #[tokio::test]
    async fn request_forces_the_variant_tool() {
        let mock = MockAIProvider::new()
            .with_tool_call(TOOL, evaluator_payload(0.8));

        chain(&mock)
            .evaluate(EvaluationVariant::Evaluator, &context())
            .await
            .unwrap();

        let calls = mock.get_calls();
        assert_eq!(calls.len(), 1);
        let request = &calls[0];
        assert_eq!(request.tools.len(), 1);
        assert_eq!(
            request.tool_choice,
            ToolChoice::Tool(TOOL.to_string())
        );
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert!(request.system_prompt.as_deref().unwrap_or_default().contains("35 %"));
    }

    #[tokio::test]
    async fn out_of_range_score_is_a_validation_error() {
        let mock = MockAIProvider::new()
            .with_tool_call(TOOL, evaluator_payload(1.5));

        let err = chain(&mock)
            .evaluate(EvaluationVariant::Evaluator, &context())
            .await
            .unwrap_err();

        match err {
            EvaluationError::Validation(v) => assert_eq!(v.path(), "score"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_tool_call_is_an_extraction_error() {
        let mock = MockAIProvider::new().with_text("No puedo evaluar esta solicitud.");

        let err = chain(&mock)
            .evaluate(EvaluationVariant::Evaluator, &context())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EvaluationError::Extraction(ExtractionError::NoToolCall { .. })
        ));
    }

    #[tokio::test]
    async fn provider_failure_is_a_generation_error() {
        let mock = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "overloaded".to_string(),
        });

        let err = chain(&mock)
            .evaluate(EvaluationVariant::Evaluator, &context())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "generation");
    }

    #[tokio::test]
    async fn single_permit_serializes_generations() {
        let delay = Duration::from_millis(40);
        let mock = MockAIProvider::new()
            .with_tool_call(TOOL, evaluator_payload(0.7))
            .with_tool_call(TOOL, evaluator_payload(0.6))
            .with_delay(delay);
        let chain = EvaluationChain::with_settings(
            Arc::new(mock.clone()),
            InstructionSet::default(),
            ChainSettings {
                max_concurrent_generations: 1,
                ..ChainSettings::default()
            },
        );
        let context = context();

        let started = Instant::now();
        let (first, second) = tokio::join!(
            chain.evaluate(EvaluationVariant::Evaluator, &context),
            chain.evaluate(EvaluationVariant::Evaluator, &context),
        );

        assert!(first.is_ok() && second.is_ok());
        assert!(started.elapsed() >= delay * 2);
        assert_eq!(mock.call_count(), 2);
    }
}
