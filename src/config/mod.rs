//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MORTGAGE_EVALUATOR` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use mortgage_evaluator::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on port {}", config.server.port);
//! ```

mod ai;
mod error;
mod evaluation;
mod server;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use evaluation::EvaluationSettings;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI provider configuration (OpenAI/Anthropic)
    #[serde(default)]
    pub ai: AiConfig,

    /// Evaluation pipeline configuration
    #[serde(default)]
    pub evaluation: EvaluationSettings,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MORTGAGE_EVALUATOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MORTGAGE_EVALUATOR__SERVER__PORT=4001` -> `server.port = 4001`
    /// - `MORTGAGE_EVALUATOR__AI__ANTHROPIC_API_KEY=...` -> `ai.anthropic_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MORTGAGE_EVALUATOR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.evaluation.validate()?;
        Ok(())
    }
}
