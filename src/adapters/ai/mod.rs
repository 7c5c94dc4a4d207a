//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port for the supported LLM vendors.
//!
//! ## Available Adapters
//!
//! - `AnthropicProvider` - Anthropic Claude models via the Messages API
//! - `OpenAIProvider` - OpenAI chat completions with function tools
//! - `MockAIProvider` - Scripted responses for tests

mod anthropic_provider;
mod mock_provider;
mod openai_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;

use crate::config::{AiConfig, AiProvider};
use crate::ports::{AIError, AIProvider};

/// Longest pause between two attempts of the same generation call.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Exponential backoff for the `retry`-th retry (zero-based), capped.
pub(crate) fn backoff_delay(base: Duration, retry: u32) -> Duration {
    let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
    base.saturating_mul(factor).min(MAX_RETRY_DELAY)
}

/// Builds the provider selected by configuration.
///
/// Fails with `AuthenticationFailed` when the selected provider has no key.
pub fn build_provider(config: &AiConfig) -> Result<Arc<dyn AIProvider>, AIError> {
    match config.provider {
        AiProvider::Anthropic => {
            let key = config
                .anthropic_api_key
                .as_ref()
                .ok_or(AIError::AuthenticationFailed)?;
            let mut settings = AnthropicConfig::new(key.expose_secret().clone())
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries)
                .with_default_max_tokens(config.max_tokens);
            if let Some(model) = &config.model {
                settings = settings.with_model(model);
            }
            if let Some(url) = &config.base_url {
                settings = settings.with_base_url(url);
            }
            Ok(Arc::new(AnthropicProvider::new(settings)?))
        }
        AiProvider::OpenAI => {
            let key = config
                .openai_api_key
                .as_ref()
                .ok_or(AIError::AuthenticationFailed)?;
            let mut settings = OpenAIConfig::new(key.expose_secret().clone())
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries);
            if let Some(model) = &config.model {
                settings = settings.with_model(model);
            }
            if let Some(url) = &config.base_url {
                settings = settings.with_base_url(url);
            }
            Ok(Arc::new(OpenAIProvider::new(settings)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    #[test]
    fn builds_anthropic_by_default() {
        let config = AiConfig {
            anthropic_api_key: Some(Secret::new("sk-ant-test".to_string())),
            ..Default::default()
        };
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.provider_info().name, "anthropic");
    }

    #[test]
    fn builds_openai_with_model_override() {
        let config = AiConfig {
            provider: AiProvider::OpenAI,
            openai_api_key: Some(Secret::new("sk-test".to_string())),
            model: Some("gpt-4o-mini".to_string()),
            ..Default::default()
        };
        let provider = build_provider(&config).unwrap();
        let info = provider.provider_info();
        assert_eq!(info.name, "openai");
        assert_eq!(info.model, "gpt-4o-mini");
    }

    #[test]
    fn backoff_doubles_then_caps() {
        let base = Duration::from_secs(1);
        assert_eq!(backoff_delay(base, 0), Duration::from_secs(1));
        assert_eq!(backoff_delay(base, 3), Duration::from_secs(8));
        assert_eq!(backoff_delay(base, 6), MAX_RETRY_DELAY);
    }

    #[test]
    fn backoff_survives_large_retry_counts() {
        let base = Duration::from_secs(1);
        for retry in [31, 32, 40, u32::MAX] {
            assert_eq!(backoff_delay(base, retry), MAX_RETRY_DELAY);
        }
    }

    #[test]
    fn missing_key_fails() {
        let config = AiConfig {
            provider: AiProvider::OpenAI,
            ..Default::default()
        };
        assert!(matches!(
            build_provider(&config),
            Err(AIError::AuthenticationFailed)
        ));
    }
}
