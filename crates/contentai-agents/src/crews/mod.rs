//! Named crews: fixed step sequences over the [`Studio`].

mod analytics;
mod content;
mod smart_script;

pub use smart_script::{SmartScriptOutput, CONTEXT_PREVIEW_CHARS};

use serde::Serialize;
use uuid::Uuid;

use crate::error::AgentError;
use crate::pipeline::{GenerationStep, PipelineOutput, StepResult};
use crate::prompts::StepBrief;
use crate::studio::Studio;
use crate::tools::ToolRequest;

/// What every crew returns.
#[derive(Debug, Clone, Serialize)]
pub struct CrewOutput {
    pub crew: &'static str,
    pub run_id: Uuid,
    pub steps: Vec<StepResult>,
    /// Final step's text.
    pub result: String,
    /// Final step's parsed output, when it required and matched a schema.
    pub structured: Option<serde_json::Value>,
}

impl CrewOutput {
    fn new(crew: &'static str, output: PipelineOutput) -> Self {
        let (result, structured) = output
            .final_step()
            .map(|last| (last.output.clone(), last.structured.clone()))
            .unwrap_or_default();
        Self {
            crew,
            run_id: output.run_id,
            steps: output.steps,
            result,
            structured,
        }
    }
}

fn require(value: &str, what: &str) -> Result<(), AgentError> {
    if value.trim().is_empty() {
        return Err(AgentError::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(())
}

fn require_any(values: &[String], what: &str) -> Result<(), AgentError> {
    if values.iter().all(|v| v.trim().is_empty()) {
        return Err(AgentError::InvalidInput(format!(
            "at least one {what} is required"
        )));
    }
    Ok(())
}

impl Studio {
    /// Build a step for `persona_id`, appending its tools' output to the
    /// instructions when the persona has tools and a request is given.
    async fn step(
        &self,
        name: &str,
        persona_id: &str,
        brief: StepBrief,
        request: Option<&ToolRequest>,
    ) -> Result<GenerationStep, AgentError> {
        let persona = self.personas.get(persona_id)?;
        let mut instructions = brief.instructions;

        if let Some(request) = request.filter(|_| !persona.tools.is_empty()) {
            let data = self.tools.gather(&persona.tools, request).await;
            instructions.push_str("\n\n");
            instructions.push_str(&data);
        }

        Ok(GenerationStep::new(
            name,
            persona,
            instructions,
            brief.expected_output,
        ))
    }
}
