//! Generation personas and the tools each one may draw on.

use std::collections::HashMap;

use contentai_core::{PersonaConfig, PersonasFile};
use serde::Serialize;

use crate::error::AgentError;

/// A data-gathering capability a persona can be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    VideoSearch,
    TrendInterest,
    RelatedQuestions,
    WebSearch,
    NewsSearch,
    ForumSearch,
    MicroblogSearch,
    ChannelReport,
    Hashtags,
    EngagementEstimate,
    PostingTime,
}

impl ToolKind {
    /// Parse a tool name as written in a personas file.
    #[must_use]
    pub fn from_name(name: &str) -> Option<ToolKind> {
        match name {
            "video_search" => Some(ToolKind::VideoSearch),
            "trend_interest" => Some(ToolKind::TrendInterest),
            "related_questions" => Some(ToolKind::RelatedQuestions),
            "web_search" => Some(ToolKind::WebSearch),
            "news_search" => Some(ToolKind::NewsSearch),
            "forum_search" => Some(ToolKind::ForumSearch),
            "microblog_search" => Some(ToolKind::MicroblogSearch),
            "channel_report" => Some(ToolKind::ChannelReport),
            "hashtags" => Some(ToolKind::Hashtags),
            "engagement_estimate" => Some(ToolKind::EngagementEstimate),
            "posting_time" => Some(ToolKind::PostingTime),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub id: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub tools: Vec<ToolKind>,
}

impl Persona {
    /// System prompt establishing who the model is for a step.
    #[must_use]
    pub fn system_prompt(&self) -> String {
        format!(
            "You are the {}.\n\nGoal: {}\n\nBackground: {}\n\n\
             Use only the data you are given. When a figure is not in the data, say it is \
             unavailable instead of estimating it.",
            self.role, self.goal, self.backstory
        )
    }
}

impl From<&PersonaConfig> for Persona {
    fn from(config: &PersonaConfig) -> Self {
        Self {
            id: config.id.clone(),
            role: config.role.clone(),
            goal: config.goal.clone(),
            backstory: config.backstory.clone(),
            // Names were validated against the known tool list at load time.
            tools: config
                .tools
                .iter()
                .filter_map(|name| ToolKind::from_name(name))
                .collect(),
        }
    }
}

pub const TOPIC_FINDER: &str = "topic_finder";
pub const CONTENT_RESEARCHER: &str = "content_researcher";
pub const SCRIPT_WRITER: &str = "script_writer";
pub const SOCIAL_OPTIMIZER: &str = "social_optimizer";
pub const GAP_ANALYZER: &str = "gap_analyzer";
pub const SMART_WRITER: &str = "smart_writer";
pub const SEO_SPECIALIST: &str = "seo_specialist";
pub const TREND_ANALYST: &str = "trend_analyst";
pub const COMPETITOR_ANALYST: &str = "competitor_analyst";
pub const TREND_FORECASTER: &str = "trend_forecaster";

fn builtin(id: &str, role: &str, goal: &str, backstory: &str, tools: &[ToolKind]) -> Persona {
    Persona {
        id: id.to_string(),
        role: role.to_string(),
        goal: goal.to_string(),
        backstory: backstory.to_string(),
        tools: tools.to_vec(),
    }
}

/// Personas by id: built-ins, optionally replaced from a personas file.
#[derive(Debug, Clone)]
pub struct PersonaCatalog {
    personas: HashMap<String, Persona>,
}

impl PersonaCatalog {
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn builtin() -> Self {
        use ToolKind::{
            ChannelReport, EngagementEstimate, ForumSearch, Hashtags, MicroblogSearch, NewsSearch,
            PostingTime, RelatedQuestions, TrendInterest, VideoSearch, WebSearch,
        };

        let personas = [
            builtin(
                TOPIC_FINDER,
                "Trending Topic Specialist",
                "Find the topics in a niche that are getting real views and engagement right now",
                "You have spent years tracking what takes off on video platforms. You judge \
                 topics by their numbers: view counts, recency, and what people keep asking.",
                &[VideoSearch, RelatedQuestions],
            ),
            builtin(
                CONTENT_RESEARCHER,
                "Content Research Analyst",
                "Gather the facts, statistics, and audience pain points a script needs",
                "You are a former journalist who checks every claim against a source and \
                 notes where each figure came from.",
                &[WebSearch],
            ),
            builtin(
                SCRIPT_WRITER,
                "Platform Script Writer",
                "Write scripts shaped to the platform's length, pacing, and hook conventions",
                "You have written for long-form channels and short vertical video alike and \
                 know how the first seconds decide whether anyone stays.",
                &[],
            ),
            builtin(
                SOCIAL_OPTIMIZER,
                "Social Media Optimizer",
                "Package finished content with captions, hashtags, and a posting plan",
                "You run distribution for creators and base every recommendation on the \
                 estimates and schedules you are handed.",
                &[Hashtags, EngagementEstimate, PostingTime],
            ),
            builtin(
                GAP_ANALYZER,
                "Content Gap Analyst",
                "Find what the top-performing videos on a topic miss, using only the collected data",
                "You read performance data for a living. You cite exact view counts and trend \
                 figures and never fill a gap with a guess.",
                &[],
            ),
            builtin(
                SMART_WRITER,
                "Data-Driven Script Writer",
                "Write a platform script whose hook and angle come from real performance data",
                "You turn analytics into scripts. Every number you mention appears in the data \
                 you were given.",
                &[],
            ),
            builtin(
                SEO_SPECIALIST,
                "SEO Specialist",
                "Recommend titles, keywords, and descriptions that match real search demand",
                "You optimize content for search and discovery using live search results and \
                 interest data.",
                &[WebSearch, TrendInterest, Hashtags],
            ),
            builtin(
                TREND_ANALYST,
                "Trend Analyst",
                "Explain how interest in a set of keywords is moving and where the conversation is",
                "You watch search interest, forums, short posts, and news together to see which \
                 movements are real.",
                &[TrendInterest, ForumSearch, MicroblogSearch, NewsSearch],
            ),
            builtin(
                COMPETITOR_ANALYST,
                "Competitor Analyst",
                "Compare channels by their published statistics and recent uploads",
                "You benchmark creators against each other and only draw conclusions the \
                 statistics support.",
                &[ChannelReport],
            ),
            builtin(
                TREND_FORECASTER,
                "Trend Forecaster",
                "Project which keywords are likely to keep gaining interest over the coming months",
                "You forecast from the direction of current interest and recent news, and you \
                 state your confidence plainly.",
                &[TrendInterest, NewsSearch],
            ),
        ];

        Self {
            personas: personas.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    /// Replace or add personas from a validated personas file.
    #[must_use]
    pub fn with_overrides(mut self, file: &PersonasFile) -> Self {
        for config in &file.personas {
            tracing::debug!(persona = %config.id, "persona override applied");
            self.personas.insert(config.id.clone(), Persona::from(config));
        }
        self
    }

    /// # Errors
    ///
    /// Returns [`AgentError::UnknownPersona`] if no persona has this id.
    pub fn get(&self, id: &str) -> Result<&Persona, AgentError> {
        self.personas
            .get(id)
            .ok_or_else(|| AgentError::UnknownPersona(id.to_string()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.personas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

impl Default for PersonaCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
