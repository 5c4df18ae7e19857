use contentai_collect::CollectError;
use contentai_core::ConfigError;
use thiserror::Error;

use crate::pipeline::{PipelineFailure, StepResult};

/// Failures talking to the text-generation service.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Missing or rejected credentials. Retrying will not help.
    #[error("generation authentication failed: {0}")]
    Auth(String),

    #[error("generation rate limited (HTTP 429)")]
    RateLimited,

    #[error("generation service unavailable (HTTP {0})")]
    Unavailable(u16),

    #[error("generation API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation response parse error: {0}")]
    Parse(String),

    #[error("generation returned no text")]
    EmptyResponse,
}

impl GenerationError {
    /// True when the failure means "fix your credentials" rather than "try again".
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, GenerationError::Auth(_))
    }
}

#[derive(Debug, Error)]
pub enum AgentError {
    /// Every provider came back empty; generation was never started.
    #[error("no real data could be collected ({} provider errors)", .errors.len())]
    SnapshotUnusable { errors: Vec<String> },

    #[error("generation credentials rejected at step '{}': {}", .0.failed_step, .0.error)]
    GenerationAuth(Box<PipelineFailure>),

    #[error("generation failed at step '{}': {}", .0.failed_step, .0.error)]
    Generation(Box<PipelineFailure>),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown persona: {0}")]
    UnknownPersona(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("provider setup failed: {0}")]
    Collect(#[from] CollectError),

    #[error("generation backend setup failed: {0}")]
    Backend(#[from] GenerationError),
}

impl From<PipelineFailure> for AgentError {
    fn from(failure: PipelineFailure) -> Self {
        if failure.error.is_auth() {
            AgentError::GenerationAuth(Box::new(failure))
        } else {
            AgentError::Generation(Box::new(failure))
        }
    }
}

impl AgentError {
    /// Message safe to show an end user or API caller.
    ///
    /// Generic failures carry no upstream detail; the full error is logged
    /// where it happens.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            AgentError::SnapshotUnusable { .. } => {
                "Could not collect real data. Check your API keys.".to_string()
            }
            AgentError::GenerationAuth(_) => {
                "Generation service rejected the configured credentials; check ANTHROPIC_API_KEY"
                    .to_string()
            }
            AgentError::InvalidInput(message) => message.clone(),
            _ => "an internal error occurred".to_string(),
        }
    }

    /// Steps that finished before a generation failure stopped the run.
    #[must_use]
    pub fn completed_steps(&self) -> &[StepResult] {
        match self {
            AgentError::GenerationAuth(failure) | AgentError::Generation(failure) => {
                &failure.completed
            }
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(error: GenerationError) -> PipelineFailure {
        PipelineFailure {
            run_id: uuid::Uuid::nil(),
            completed: vec![StepResult {
                name: "analysis".to_string(),
                output: "gaps".to_string(),
                structured: None,
            }],
            failed_step: "script".to_string(),
            error,
        }
    }

    #[test]
    fn auth_failures_are_distinguished() {
        let err = AgentError::from(failure(GenerationError::Auth("invalid x-api-key".into())));
        assert!(matches!(err, AgentError::GenerationAuth(_)));
        assert!(err.public_message().contains("ANTHROPIC_API_KEY"));

        let err = AgentError::from(failure(GenerationError::RateLimited));
        assert!(matches!(err, AgentError::Generation(_)));
    }

    #[test]
    fn partial_results_survive_conversion() {
        let err = AgentError::from(failure(GenerationError::Unavailable(529)));
        assert_eq!(err.completed_steps().len(), 1);
        assert_eq!(err.completed_steps()[0].name, "analysis");
        assert!(err.to_string().contains("'script'"));
    }

    #[test]
    fn generic_failures_hide_details() {
        let err = AgentError::from(failure(GenerationError::Api {
            status: 400,
            message: "prompt is too long: 250000 tokens".to_string(),
        }));
        assert_eq!(err.public_message(), "an internal error occurred");
    }

    #[test]
    fn unusable_snapshot_counts_errors() {
        let err = AgentError::SnapshotUnusable {
            errors: vec!["a".into(), "b".into(), "c".into()],
        };
        assert_eq!(
            err.to_string(),
            "no real data could be collected (3 provider errors)"
        );
        assert!(err.completed_steps().is_empty());
    }
}
