use contentai_core::Platform;

use super::{require, require_any, CrewOutput};
use crate::error::AgentError;
use crate::persona::{COMPETITOR_ANALYST, SEO_SPECIALIST, TREND_ANALYST, TREND_FORECASTER};
use crate::prompts;
use crate::studio::Studio;
use crate::tools::ToolRequest;

fn cleaned(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn keyword_request(keywords: &[String]) -> ToolRequest {
    let mut request = ToolRequest::new(keywords.join(" "), Platform::YouTube);
    request.keywords = keywords.to_vec();
    request
}

impl Studio {
    /// # Errors
    ///
    /// [`AgentError::InvalidInput`] for an empty topic, or a generation failure.
    pub async fn seo(&self, topic: &str) -> Result<CrewOutput, AgentError> {
        require(topic, "topic")?;
        let request = ToolRequest::new(topic, Platform::YouTube);

        let step = self
            .step("seo", SEO_SPECIALIST, prompts::seo(topic), Some(&request))
            .await?;
        let output = self.runner.run(&[step], "").await?;
        Ok(CrewOutput::new("seo", output))
    }

    /// # Errors
    ///
    /// [`AgentError::InvalidInput`] without keywords, or a generation failure.
    pub async fn analyze_trends(&self, keywords: &[String]) -> Result<CrewOutput, AgentError> {
        require_any(keywords, "keyword")?;
        let keywords = cleaned(keywords);

        let step = self
            .step(
                "trend_analysis",
                TREND_ANALYST,
                prompts::trend_analysis(&keywords),
                Some(&keyword_request(&keywords)),
            )
            .await?;
        let output = self.runner.run(&[step], "").await?;
        Ok(CrewOutput::new("analyze_trends", output))
    }

    /// # Errors
    ///
    /// [`AgentError::InvalidInput`] without channel names, or a generation failure.
    pub async fn analyze_competitors(
        &self,
        channels: &[String],
    ) -> Result<CrewOutput, AgentError> {
        require_any(channels, "channel")?;
        let channels = cleaned(channels);

        let mut request = ToolRequest::new(channels.join(", "), Platform::YouTube);
        request.channels.clone_from(&channels);

        let step = self
            .step(
                "competitor_analysis",
                COMPETITOR_ANALYST,
                prompts::competitor_analysis(&channels),
                Some(&request),
            )
            .await?;
        let output = self.runner.run(&[step], "").await?;
        Ok(CrewOutput::new("analyze_competitors", output))
    }

    /// # Errors
    ///
    /// [`AgentError::InvalidInput`] without keywords, or a generation failure.
    pub async fn predict_trends(&self, keywords: &[String]) -> Result<CrewOutput, AgentError> {
        require_any(keywords, "keyword")?;
        let keywords = cleaned(keywords);

        let step = self
            .step(
                "prediction",
                TREND_FORECASTER,
                prompts::prediction(&keywords),
                Some(&keyword_request(&keywords)),
            )
            .await?;
        let output = self.runner.run(&[step], "").await?;
        Ok(CrewOutput::new("predict_trends", output))
    }
}
