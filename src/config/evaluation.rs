//! Evaluation pipeline configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Evaluation pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationSettings {
    /// Directory holding `{variant}.md` instruction overrides
    pub prompts_dir: Option<PathBuf>,

    /// Upper bound on simultaneous outbound generation calls
    #[serde(default = "default_max_concurrent_generations")]
    pub max_concurrent_generations: usize,
}

impl EvaluationSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_concurrent_generations == 0 {
            return Err(ValidationError::InvalidConcurrency);
        }
        if let Some(dir) = &self.prompts_dir {
            if !dir.is_dir() {
                return Err(ValidationError::PromptsDirNotFound(dir.clone()));
            }
        }
        Ok(())
    }
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            prompts_dir: None,
            max_concurrent_generations: default_max_concurrent_generations(),
        }
    }
}

fn default_max_concurrent_generations() -> usize {
    8
}
