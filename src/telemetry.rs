//! Tracing subscriber initialization.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, ServerConfig};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },

    #[error("telemetry error: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `server.log_level` when set.
pub fn init(config: &ServerConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => configured_filter(&config.log_level)?,
    };

    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .with_current_span(false)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .try_init(),
    }
    .map_err(TelemetryError::Subscriber)
}

fn configured_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(log_level).map_err(|source| TelemetryError::EnvFilter {
        value: log_level.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_level_parses() {
        assert!(configured_filter(&ServerConfig::default().log_level).is_ok());
    }

    #[test]
    fn bad_level_reports_the_configured_value() {
        match configured_filter("mortgage_evaluator=loud") {
            Err(TelemetryError::EnvFilter { value, .. }) => {
                assert_eq!(value, "mortgage_evaluator=loud")
            }
            other => panic!("expected filter error, got {:?}", other.map(|_| ())),
        }
    }
}
