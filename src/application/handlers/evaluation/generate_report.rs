//! GenerateReportHandler - Technical evaluation plus both derived conclusions

use serde_json::Value;

use super::chain::EvaluationChain;
use crate::domain::evaluation::{
    follow_up, EvaluationContext, EvaluationError, EvaluationReport, EvaluationVariant,
};
use crate::domain::loan::normalize_application;
use crate::ports::{AIError, MessageRole};

/// Command to produce the full three-part report for one application
#[derive(Debug, Clone)]
pub struct GenerateReportCommand {
    pub payload: Value,
}

impl GenerateReportCommand {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }
}

/// Handler producing an `EvaluationReport`
#[derive(Clone)]
pub struct GenerateReportHandler {
    chain: EvaluationChain,
}

impl GenerateReportHandler {
    pub fn new(chain: EvaluationChain) -> Self {
        Self { chain }
    }

    /// Runs the evaluator, then both conclusions concurrently on top of it.
    ///
    /// The first failure aborts the whole report.
    pub async fn handle(
        &self,
        cmd: GenerateReportCommand,
    ) -> Result<EvaluationReport, EvaluationError> {
        let application = normalize_application(cmd.payload)?;
        let base = EvaluationContext::new(&application);

        let evaluation = self
            .chain
            .evaluate(EvaluationVariant::Evaluator, &base)
            .await?;

        let with_evaluation = base
            .with_prior_result(&evaluation)
            .map_err(|e| AIError::InvalidRequest(format!("prior evaluation not serializable: {}", e)))?;

        let executive_context = with_evaluation.clone().with_turn(
            MessageRole::User,
            follow_up(EvaluationVariant::ExecutiveSummary),
        );
        let client_context = with_evaluation.with_turn(
            MessageRole::User,
            follow_up(EvaluationVariant::ClientResponse),
        );

        let (executive_summary, client_response) = futures::try_join!(
            self.chain
                .evaluate(EvaluationVariant::ExecutiveSummary, &executive_context),
            self.chain
                .evaluate(EvaluationVariant::ClientResponse, &client_context),
        )?;

        Ok(EvaluationReport {
            evaluation,
            executive_summary,
            client_response,
        })
    }
}
