//! Conversational context handed to the evaluation chain.

use crate::domain::loan::ApplicationRequest;
use crate::ports::{Message, MessageRole};

use super::result::EvaluationResult;

/// Serialized application plus any accumulated conversation turns.
///
/// The application always opens the conversation as the first user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationContext {
    application_json: String,
    turns: Vec<Message>,
}

impl EvaluationContext {
    pub fn new(application: &ApplicationRequest) -> Self {
        Self {
            application_json: application.to_prompt_json(),
            turns: Vec::new(),
        }
    }

    /// Appends a conversation turn.
    pub fn with_turn(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.turns.push(Message::new(role, content));
        self
    }

    /// Appends a prior result as an assistant turn.
    pub fn with_prior_result(self, result: &EvaluationResult) -> Result<Self, serde_json::Error> {
        let content = serde_json::to_string_pretty(result)?;
        Ok(self.with_turn(MessageRole::Assistant, content))
    }

    pub fn application_json(&self) -> &str {
        &self.application_json
    }

    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    /// Messages in send order: the application first, then the extra turns.
    pub fn messages(&self) -> Vec<Message> {
        std::iter::once(Message::user(self.application_json.clone()))
            .chain(self.turns.iter().cloned())
            .collect()
    }
}
