//! Scripted [`AIProvider`] for handler and gateway tests.
//!
//! Replies are queued up front and handed out one per `complete` call; every
//! request is recorded so tests can assert on what the chain actually sent.
//! Clones share the queue and the call log.
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_tool_call("evaluar_solicitud_hipotecaria", json!({ "score": 0.8 }));
//!
//! let response = provider.complete(request).await?;
//! assert_eq!(response.tool_calls.len(), 1);
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::evaluation::ToolCall;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

#[derive(Debug, Clone)]
pub struct MockAIProvider {
    script: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    latency: Duration,
    recorded: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success {
        content: String,
        tool_calls: Vec<ToolCall>,
        finish_reason: FinishReason,
    },
    Error(MockError),
}

/// Cloneable stand-ins for the provider failures a test may script.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    ContentFiltered { reason: String },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::ContentFiltered { reason } => AIError::content_filtered(reason),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1", 128_000),
            latency: Duration::ZERO,
            recorded: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a response with a single tool invocation.
    pub fn with_tool_call(self, name: impl Into<String>, arguments: Value) -> Self {
        self.with_tool_calls(vec![ToolCall::new(name, arguments)])
    }

    /// Queues a response with the given tool invocations (possibly none).
    pub fn with_tool_calls(self, tool_calls: Vec<ToolCall>) -> Self {
        self.push(MockResponse::Success {
            content: String::new(),
            tool_calls,
            finish_reason: FinishReason::ToolUse,
        })
    }

    /// Queues a plain text response without tool invocations.
    pub fn with_text(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success {
            content: content.into(),
            tool_calls: Vec::new(),
            finish_reason: FinishReason::Stop,
        })
    }

    /// Queues an error response.
    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error))
    }

    /// Sleeps this long before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.latency = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.recorded).len()
    }

    /// Requests received so far, oldest first.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        lock(&self.recorded).clone()
    }

    pub fn clear_calls(&self) {
        lock(&self.recorded).clear();
    }

    fn push(self, response: MockResponse) -> Self {
        lock(&self.script).push_back(response);
        self
    }

    /// Next queued response; an exhausted queue yields a text-only reply.
    fn next_response(&self) -> MockResponse {
        lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: "Mock response".to_string(),
                tool_calls: Vec::new(),
                finish_reason: FinishReason::Stop,
            })
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        lock(&self.recorded).push(request);

        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }

        match self.next_response() {
            MockResponse::Success {
                content,
                tool_calls,
                finish_reason,
            } => Ok(CompletionResponse {
                content,
                tool_calls,
                usage: TokenUsage::new(10, 20),
                model: self.info.model.clone(),
                finish_reason,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
