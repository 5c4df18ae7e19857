//! Sequential multi-step generation.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Instant;

use contentai_collect::CollectedSnapshot;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::{GenerationBackend, GenerationRequest};
use crate::error::{AgentError, GenerationError};
use crate::models::OutputSchema;
use crate::parser::extract_json;
use crate::persona::Persona;

/// One unit of generation work: a persona and what it must produce.
#[derive(Debug, Clone)]
pub struct GenerationStep {
    pub name: String,
    pub persona: Persona,
    pub instructions: String,
    pub expected_output: String,
    pub schema: Option<OutputSchema>,
}

impl GenerationStep {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        persona: &Persona,
        instructions: impl Into<String>,
        expected_output: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            persona: persona.clone(),
            instructions: instructions.into(),
            expected_output: expected_output.into(),
            schema: None,
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: OutputSchema) -> Self {
        self.schema = Some(schema);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    pub name: String,
    pub output: String,
    /// Parsed output when the step required a schema and the text conformed.
    pub structured: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub run_id: Uuid,
    pub steps: Vec<StepResult>,
}

impl PipelineOutput {
    /// Result of the last step, which is the crew's deliverable.
    #[must_use]
    pub fn final_step(&self) -> Option<&StepResult> {
        self.steps.last()
    }
}

/// A run stopped by a generation error. Completed steps are kept.
#[derive(Debug, Error)]
#[error("step '{failed_step}' failed after {} completed steps: {error}", .completed.len())]
pub struct PipelineFailure {
    pub run_id: Uuid,
    pub completed: Vec<StepResult>,
    pub failed_step: String,
    pub error: GenerationError,
}

/// Runs steps in order, feeding each one the outputs before it.
#[derive(Clone)]
pub struct PipelineRunner {
    backend: Arc<dyn GenerationBackend>,
    max_tokens: u32,
}

impl PipelineRunner {
    #[must_use]
    pub fn new(backend: Arc<dyn GenerationBackend>, max_tokens: u32) -> Self {
        Self {
            backend,
            max_tokens,
        }
    }

    /// Execute `steps` sequentially with `initial_context` prepended to every prompt.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineFailure`] at the first step whose generation fails;
    /// later steps are not attempted.
    pub async fn run(
        &self,
        steps: &[GenerationStep],
        initial_context: &str,
    ) -> Result<PipelineOutput, PipelineFailure> {
        let run_id = Uuid::new_v4();
        let mut completed: Vec<StepResult> = Vec::with_capacity(steps.len());

        tracing::info!(
            %run_id,
            steps = steps.len(),
            model = self.backend.model(),
            "pipeline started"
        );

        for step in steps {
            let request = GenerationRequest {
                system: step.persona.system_prompt(),
                prompt: build_prompt(step, initial_context, &completed),
                max_tokens: self.max_tokens,
            };

            tracing::info!(%run_id, step = %step.name, persona = %step.persona.id, "step started");
            let started = Instant::now();

            let output = match self.backend.generate(&request).await {
                Ok(output) => output,
                Err(error) => {
                    tracing::error!(
                        %run_id,
                        step = %step.name,
                        error = %error,
                        completed = completed.len(),
                        "step failed; stopping pipeline"
                    );
                    return Err(PipelineFailure {
                        run_id,
                        completed,
                        failed_step: step.name.clone(),
                        error,
                    });
                }
            };

            let structured = step
                .schema
                .and_then(|schema| structure(&run_id, &step.name, schema, &output));

            tracing::info!(
                %run_id,
                step = %step.name,
                chars = output.len(),
                structured = structured.is_some(),
                elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                "step finished"
            );

            completed.push(StepResult {
                name: step.name.clone(),
                output,
                structured,
            });
        }

        tracing::info!(%run_id, "pipeline finished");
        Ok(PipelineOutput {
            run_id,
            steps: completed,
        })
    }

    /// Run `steps` grounded in a collected snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::SnapshotUnusable`] without calling the backend
    /// when the snapshot holds no data, or the converted [`PipelineFailure`]
    /// when a step fails.
    pub async fn run_grounded(
        &self,
        snapshot: &CollectedSnapshot,
        steps: &[GenerationStep],
    ) -> Result<PipelineOutput, AgentError> {
        if !snapshot.has_data() {
            tracing::warn!(
                topic = snapshot.topic(),
                errors = snapshot.errors().len(),
                "snapshot has no data; refusing to generate"
            );
            return Err(AgentError::SnapshotUnusable {
                errors: snapshot.errors().to_vec(),
            });
        }

        Ok(self.run(steps, &snapshot.to_context()).await?)
    }
}

fn structure(
    run_id: &Uuid,
    step: &str,
    schema: OutputSchema,
    output: &str,
) -> Option<serde_json::Value> {
    let Some(value) = extract_json(output) else {
        tracing::warn!(%run_id, step, schema = schema.name(), "no JSON object in step output");
        return None;
    };
    match schema.conform(value) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(
                %run_id,
                step,
                schema = schema.name(),
                error = %e,
                "step output does not match schema"
            );
            None
        }
    }
}

fn build_prompt(step: &GenerationStep, initial_context: &str, prior: &[StepResult]) -> String {
    let mut prompt = String::new();

    if !initial_context.trim().is_empty() {
        let _ = write!(prompt, "## CONTEXT\n\n{}\n\n", initial_context.trim_end());
    }

    for result in prior {
        let _ = write!(
            prompt,
            "## OUTPUT OF STEP '{}'\n\n{}\n\n",
            result.name,
            result.output.trim_end()
        );
    }

    let _ = write!(
        prompt,
        "## TASK\n\n{}\n\n## EXPECTED OUTPUT\n\n{}\n",
        step.instructions.trim_end(),
        step.expected_output.trim_end()
    );

    if let Some(schema) = step.schema {
        let _ = write!(
            prompt,
            "\n## OUTPUT FORMAT\n\nRespond with a single JSON object ({}) with this shape:\n\n{}\n",
            schema.name(),
            schema.shape()
        );
    }

    prompt
}
