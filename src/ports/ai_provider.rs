//! Generation backend port.
//!
//! The evaluation chain reaches the language model only through
//! [`AIProvider`]. Requests carry the instruction text, the role-tagged turns
//! and the tools on offer; a [`ToolChoice`] can pin the reply to one named
//! tool. Replies expose tool invocations as vendor-neutral [`ToolCall`]s, so
//! Anthropic content blocks and OpenAI function calls stay inside adapters.
//!
//! ```ignore
//! #[async_trait]
//! impl AIProvider for CannedProvider {
//!     async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
//!         let tool = request.forced_tool().unwrap_or("none");
//!         Ok(self.reply_for(tool))
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("canned", "fixture", 8_000)
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::evaluation::{ToolCall, ToolSpec};

/// A language model that can be asked for one completion at a time.
#[async_trait]
pub trait AIProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Vendor, model and limits, for logs.
    fn provider_info(&self) -> ProviderInfo;
}

/// One generation call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub system_prompt: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub tools: Vec<ToolSpec>,
    pub tool_choice: ToolChoice,
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            max_tokens: None,
            temperature: None,
            tools: Vec::new(),
            tool_choice: ToolChoice::Auto,
            metadata,
        }
    }

    pub fn with_message(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages.push(Message::new(role, content));
        self
    }

    pub fn with_messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, limit: u32) -> Self {
        self.max_tokens = Some(limit);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Replaces the offered tools with `tool` alone and requires the model to
    /// invoke it.
    pub fn with_forced_tool(mut self, tool: ToolSpec) -> Self {
        self.tool_choice = ToolChoice::Tool(tool.name().to_string());
        self.tools = vec![tool];
        self
    }

    pub fn forced_tool(&self) -> Option<&str> {
        match &self.tool_choice {
            ToolChoice::Tool(name) => Some(name),
            ToolChoice::Auto => None,
        }
    }
}

/// Whether the model may pick among the offered tools or must call one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ToolChoice {
    #[default]
    Auto,
    Tool(String),
}

/// A role-tagged conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Correlation data attached to each call; adapters log it, never send it.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    pub evaluation_id: Uuid,
    /// Variant name of the calling evaluation.
    pub operation: String,
}

impl RequestMetadata {
    pub fn new(evaluation_id: Uuid, operation: impl Into<String>) -> Self {
        Self {
            evaluation_id,
            operation: operation.into(),
        }
    }
}

/// The model's reply, already stripped of its vendor envelope.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Free text emitted alongside, or instead of, tool invocations.
    pub content: String,
    /// Invocations in emission order.
    pub tool_calls: Vec<ToolCall>,
    pub usage: TokenUsage,
    pub model: String,
    pub finish_reason: FinishReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    ToolUse,
    /// The token limit cut the reply short.
    Length,
    ContentFilter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Vendor label, `anthropic` or `openai`.
    pub name: String,
    pub model: String,
    pub max_context_tokens: u32,
    pub supports_tools: bool,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>, max_context_tokens: u32) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            max_context_tokens,
            supports_tools: true,
        }
    }
}

/// Failures reported by a generation backend.
///
/// Only transport-level conditions are retryable; see [`AIError::is_retryable`].
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    #[error("prompt exceeds the model context window: {0}")]
    ContextTooLong(String),

    #[error("generation blocked by content filter: {reason}")]
    ContentFiltered { reason: String },

    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("provider rejected the API key")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    #[error("unreadable provider response: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn context_too_long(detail: impl Into<String>) -> Self {
        Self::ContextTooLong(detail.into())
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }
}
