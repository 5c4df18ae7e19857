use contentai_core::Platform;

use super::{require, CrewOutput};
use crate::error::AgentError;
use crate::models::OutputSchema;
use crate::persona::{CONTENT_RESEARCHER, SCRIPT_WRITER, SOCIAL_OPTIMIZER, TOPIC_FINDER};
use crate::prompts;
use crate::studio::Studio;
use crate::tools::ToolRequest;

impl Studio {
    /// Find content ideas in `niche`, optionally around one topic.
    ///
    /// # Errors
    ///
    /// [`AgentError::InvalidInput`] for an empty niche, or a generation failure.
    pub async fn find_topics(
        &self,
        niche: &str,
        topic: Option<&str>,
    ) -> Result<CrewOutput, AgentError> {
        require(niche, "niche")?;
        let topic = topic.map(str::trim).filter(|t| !t.is_empty());

        let mut request = ToolRequest::new(topic.unwrap_or(niche), Platform::YouTube);
        request.niche = niche.to_string();

        let step = self
            .step(
                "find_topics",
                TOPIC_FINDER,
                prompts::find_topics(niche, topic),
                Some(&request),
            )
            .await?
            .with_schema(OutputSchema::TopicFinder);

        let output = self.runner.run(&[step], "").await?;
        Ok(CrewOutput::new("find_topics", output))
    }

    /// # Errors
    ///
    /// [`AgentError::InvalidInput`] for an empty topic, or a generation failure.
    pub async fn research(&self, topic: &str) -> Result<CrewOutput, AgentError> {
        require(topic, "topic")?;
        let request = ToolRequest::new(topic, Platform::YouTube);

        let step = self
            .step(
                "research",
                CONTENT_RESEARCHER,
                prompts::research(topic),
                Some(&request),
            )
            .await?
            .with_schema(OutputSchema::ContentResearch);

        let output = self.runner.run(&[step], "").await?;
        Ok(CrewOutput::new("research", output))
    }

    /// # Errors
    ///
    /// [`AgentError::InvalidInput`] for an empty topic, or a generation failure.
    pub async fn write_script(
        &self,
        topic: &str,
        platform: Platform,
        research_context: Option<&str>,
    ) -> Result<CrewOutput, AgentError> {
        require(topic, "topic")?;
        let research_context = research_context.map(str::trim).filter(|c| !c.is_empty());

        let step = self
            .step(
                "script",
                SCRIPT_WRITER,
                prompts::write_script(topic, platform, research_context),
                None,
            )
            .await?
            .with_schema(OutputSchema::Script);

        let output = self.runner.run(&[step], "").await?;
        Ok(CrewOutput::new("write_script", output))
    }

    /// Topic finding, research, script writing, and social packaging in one run.
    ///
    /// Tool data for every step is gathered before the first generation call.
    ///
    /// # Errors
    ///
    /// [`AgentError::InvalidInput`] for an empty niche, or a generation
    /// failure carrying the steps completed before it.
    pub async fn full_content(
        &self,
        niche: &str,
        topic: Option<&str>,
        platform: Platform,
    ) -> Result<CrewOutput, AgentError> {
        require(niche, "niche")?;
        let topic = topic.map(str::trim).filter(|t| !t.is_empty());
        let subject = topic.unwrap_or(niche);

        let mut request = ToolRequest::new(subject, platform);
        request.niche = niche.to_string();

        let (find, research, social) = tokio::join!(
            self.step(
                "find_topics",
                TOPIC_FINDER,
                prompts::find_topics(niche, topic),
                Some(&request),
            ),
            self.step(
                "research",
                CONTENT_RESEARCHER,
                prompts::research(subject),
                Some(&request),
            ),
            self.step(
                "social",
                SOCIAL_OPTIMIZER,
                prompts::social_package(subject, platform),
                Some(&request),
            ),
        );
        let write = self
            .step(
                "script",
                SCRIPT_WRITER,
                prompts::write_script(
                    subject,
                    platform,
                    Some("Use the topic and research outputs above."),
                ),
                None,
            )
            .await?;

        let steps = vec![
            find?.with_schema(OutputSchema::TopicFinder),
            research?.with_schema(OutputSchema::ContentResearch),
            write.with_schema(OutputSchema::Script),
            social?.with_schema(OutputSchema::CompleteContent),
        ];

        let output = self.runner.run(&steps, "").await?;
        Ok(CrewOutput::new("full_content", output))
    }
}
