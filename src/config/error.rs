//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid host address: {0}")]
    InvalidHost(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Temperature must be within [0, 2], got {0}")]
    InvalidTemperature(f32),

    #[error("max_retries must be at most {max}, got {actual}")]
    InvalidMaxRetries { actual: u32, max: u32 },

    #[error("max_tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("max_concurrent_generations must be greater than zero")]
    InvalidConcurrency,

    #[error("Prompts directory not found: {}", .0.display())]
    PromptsDirNotFound(PathBuf),
}
