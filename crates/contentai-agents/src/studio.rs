use std::sync::Arc;

use contentai_collect::{CollectConfig, CollectedSnapshot, Collector, ProviderSet};
use contentai_core::{load_heuristics, load_personas, AppConfig, HeuristicsConfig, Platform};

use crate::backend::{AnthropicBackend, AnthropicConfig, GenerationBackend};
use crate::error::AgentError;
use crate::heuristics::{
    estimate_engagement, generate_hashtags, recommend_posting_time, EngagementEstimate,
    EngagementInput, HashtagSet, PostingPlan,
};
use crate::persona::PersonaCatalog;
use crate::pipeline::PipelineRunner;
use crate::tools::ToolBox;

/// Everything a crew needs: collection, tools, personas, and a runner.
///
/// Built once per process from [`AppConfig`] and shared.
#[derive(Clone)]
pub struct Studio {
    pub(crate) collector: Collector,
    pub(crate) tools: ToolBox,
    pub(crate) personas: PersonaCatalog,
    pub(crate) runner: PipelineRunner,
}

impl Studio {
    #[must_use]
    pub fn new(
        collector: Collector,
        tools: ToolBox,
        personas: PersonaCatalog,
        runner: PipelineRunner,
    ) -> Self {
        Self {
            collector,
            tools,
            personas,
            runner,
        }
    }

    /// Build a studio backed by the Anthropic Messages API.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError`] if the heuristics or personas file cannot be
    /// loaded, or an HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AgentError> {
        let backend = AnthropicBackend::new(&AnthropicConfig::from_app_config(config))?;
        Self::with_backend(config, Arc::new(backend))
    }

    /// Like [`Studio::from_config`] with a caller-supplied generation backend.
    ///
    /// # Errors
    ///
    /// Same as [`Studio::from_config`].
    pub fn with_backend(
        config: &AppConfig,
        backend: Arc<dyn GenerationBackend>,
    ) -> Result<Self, AgentError> {
        let heuristics = match &config.heuristics_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading heuristic constants");
                load_heuristics(path)?
            }
            None => HeuristicsConfig::default(),
        };

        let mut personas = PersonaCatalog::builtin();
        if let Some(path) = &config.personas_path {
            tracing::info!(path = %path.display(), "loading persona overrides");
            personas = personas.with_overrides(&load_personas(path)?);
        }

        let collect_config = CollectConfig::from_app_config(config, heuristics.trend_band);
        let providers = ProviderSet::from_config(&collect_config)?;

        Ok(Self::new(
            Collector::from_providers(&providers),
            ToolBox::new(providers, Arc::new(heuristics)),
            personas,
            PipelineRunner::new(backend, config.generation_max_tokens),
        ))
    }

    /// Collect a snapshot without generating anything.
    pub async fn collect(&self, topic: &str, platform: Platform) -> CollectedSnapshot {
        self.collector.collect(topic, platform.as_str()).await
    }

    #[must_use]
    pub fn engagement(&self, input: &EngagementInput) -> EngagementEstimate {
        estimate_engagement(input, &self.tools.heuristics().engagement)
    }

    #[must_use]
    pub fn posting_time(&self, platform: Platform, niche: &str, audience: &str) -> PostingPlan {
        recommend_posting_time(platform, niche, audience, &self.tools.heuristics().posting)
    }

    /// Hashtags for a topic, seeded with its real rising search queries when
    /// they can be fetched.
    pub async fn hashtags(&self, topic: &str, niche: &str, platform: Platform) -> HashtagSet {
        let rising = self.tools.rising_queries(topic).await.unwrap_or_else(|e| {
            tracing::warn!(topic, error = %e, "rising queries unavailable; hashtags use topic words only");
            Vec::new()
        });
        generate_hashtags(topic, niche, platform, &rising)
    }

    #[must_use]
    pub fn personas(&self) -> &PersonaCatalog {
        &self.personas
    }
}
