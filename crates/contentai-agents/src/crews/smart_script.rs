use contentai_collect::SnapshotSummary;
use contentai_core::Platform;
use serde::Serialize;

use super::{require, CrewOutput};
use crate::error::AgentError;
use crate::models::OutputSchema;
use crate::persona::{GAP_ANALYZER, SMART_WRITER};
use crate::prompts;
use crate::studio::Studio;

pub const CONTEXT_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone, Serialize)]
pub struct SmartScriptOutput {
    pub collected: SnapshotSummary,
    /// Start of the grounding context the steps received.
    pub context_preview: String,
    #[serde(flatten)]
    pub output: CrewOutput,
}

fn preview(context: &str) -> String {
    match context.char_indices().nth(CONTEXT_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &context[..cut]),
        None => context.to_string(),
    }
}

impl Studio {
    /// Collect real data for `topic`, then analyze gaps and write a script
    /// grounded in it.
    ///
    /// # Errors
    ///
    /// - [`AgentError::InvalidInput`] for an empty topic.
    /// - [`AgentError::SnapshotUnusable`] when collection found nothing; no
    ///   generation is attempted.
    /// - [`AgentError::GenerationAuth`] or [`AgentError::Generation`] when a
    ///   step fails, carrying any completed steps.
    pub async fn smart_script(
        &self,
        topic: &str,
        platform: Platform,
    ) -> Result<SmartScriptOutput, AgentError> {
        require(topic, "topic")?;

        let snapshot = self.collect(topic.trim(), platform).await;

        let steps = vec![
            self.step("analysis", GAP_ANALYZER, prompts::gap_analysis(), None)
                .await?,
            self.step(
                "script",
                SMART_WRITER,
                prompts::smart_script(platform, &snapshot),
                None,
            )
            .await?
            .with_schema(OutputSchema::Script),
        ];

        let output = self.runner.run_grounded(&snapshot, &steps).await?;

        Ok(SmartScriptOutput {
            collected: snapshot.summary(),
            context_preview: preview(&snapshot.to_context()),
            output: CrewOutput::new("smart_script", output),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_cuts_on_char_boundary() {
        let long = "é".repeat(CONTEXT_PREVIEW_CHARS + 10);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), CONTEXT_PREVIEW_CHARS + 3);

        assert_eq!(preview("short"), "short");
    }
}
