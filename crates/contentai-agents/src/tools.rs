//! Typed tool invocation for personas.
//!
//! Each [`ToolKind`] maps to one explicit client call or heuristic. The
//! results are rendered into a text block the crew places in the step's
//! instructions. A failing tool renders an "unavailable" line with its reason;
//! nothing is substituted for missing data.

use std::fmt::Write as _;
use std::sync::Arc;

use contentai_collect::{
    render_channel_report, render_forum_posts, render_micro_posts, render_news,
    render_search_page, render_trends, render_videos, CollectError, ProviderSet,
    MAX_CONTEXT_QUESTIONS,
};
use contentai_core::{HeuristicsConfig, Platform};

use crate::heuristics::{
    estimate_engagement, generate_hashtags, recommend_posting_time, EngagementInput,
};
use crate::persona::ToolKind;

/// What the tools are asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequest {
    pub topic: String,
    pub niche: String,
    pub platform: Platform,
    /// Keywords for interest lookups; the topic is used when empty.
    pub keywords: Vec<String>,
    /// Channel names for channel reports.
    pub channels: Vec<String>,
    /// Audience location for posting-time advice, e.g. "US" or "Europe".
    pub audience: String,
}

impl ToolRequest {
    #[must_use]
    pub fn new(topic: impl Into<String>, platform: Platform) -> Self {
        Self {
            topic: topic.into(),
            niche: String::new(),
            platform,
            keywords: Vec::new(),
            channels: Vec::new(),
            audience: "US".to_string(),
        }
    }

    fn interest_keywords(&self) -> Vec<String> {
        if self.keywords.is_empty() {
            vec![self.topic.clone()]
        } else {
            self.keywords.clone()
        }
    }
}

/// Provider clients plus heuristic constants, shared by every crew.
#[derive(Clone)]
pub struct ToolBox {
    providers: ProviderSet,
    heuristics: Arc<HeuristicsConfig>,
}

fn unavailable(out: &mut String, label: &str, error: &CollectError) {
    tracing::warn!(tool = label, error = %error, "tool unavailable");
    let _ = writeln!(out, "### {label}: unavailable: {error}");
}

impl ToolBox {
    #[must_use]
    pub fn new(providers: ProviderSet, heuristics: Arc<HeuristicsConfig>) -> Self {
        Self {
            providers,
            heuristics,
        }
    }

    #[must_use]
    pub fn heuristics(&self) -> &HeuristicsConfig {
        &self.heuristics
    }

    /// Run `tools` in order and render everything they returned.
    ///
    /// A video search that runs before an engagement estimate feeds the
    /// estimate its recent-video count.
    pub async fn gather(&self, tools: &[ToolKind], request: &ToolRequest) -> String {
        let mut out = String::from("## TOOL DATA\n");
        let mut recent_video_count: Option<usize> = None;

        for tool in tools {
            out.push('\n');
            match tool {
                ToolKind::VideoSearch => {
                    let heading = format!("TOP VIDEOS: \"{}\"", request.topic);
                    match self
                        .providers
                        .youtube
                        .search_videos(&request.topic, Some(request.platform))
                        .await
                    {
                        Ok(videos) => {
                            recent_video_count = Some(videos.len());
                            out.push_str(&render_videos(&heading, &videos));
                        }
                        Err(e) => unavailable(&mut out, &heading, &e),
                    }
                }
                ToolKind::TrendInterest => {
                    match self
                        .providers
                        .trends
                        .interest(&request.interest_keywords())
                        .await
                    {
                        Ok(trends) => out.push_str(&render_trends(&trends)),
                        Err(e) => unavailable(&mut out, "SEARCH TRENDS", &e),
                    }
                }
                ToolKind::RelatedQuestions => {
                    match self.providers.serp.related_questions(&request.topic).await {
                        Ok(questions) => {
                            out.push_str("### PEOPLE ALSO ASK (REAL):\n");
                            for question in questions.iter().take(MAX_CONTEXT_QUESTIONS) {
                                let _ = writeln!(out, "- {question}");
                            }
                        }
                        Err(e) => unavailable(&mut out, "PEOPLE ALSO ASK", &e),
                    }
                }
                ToolKind::WebSearch => match self.providers.serp.web_search(&request.topic).await {
                    Ok(page) => out.push_str(&render_search_page(&page)),
                    Err(e) => unavailable(&mut out, "WEB SEARCH", &e),
                },
                ToolKind::NewsSearch => match self.providers.serp.news(&request.topic).await {
                    Ok(items) => out.push_str(&render_news(&request.topic, &items)),
                    Err(e) => unavailable(&mut out, "NEWS", &e),
                },
                ToolKind::ForumSearch => match self.providers.reddit.search(&request.topic).await {
                    Ok(posts) => out.push_str(&render_forum_posts(&request.topic, &posts)),
                    Err(e) => unavailable(&mut out, "FORUM DISCUSSIONS", &e),
                },
                ToolKind::MicroblogSearch => {
                    match self.providers.twitter.search_recent(&request.topic).await {
                        Ok(posts) => out.push_str(&render_micro_posts(&request.topic, &posts)),
                        Err(e) => unavailable(&mut out, "SOCIAL POSTS", &e),
                    }
                }
                ToolKind::ChannelReport => out.push_str(&self.channel_reports(&request.channels).await),
                ToolKind::Hashtags => out.push_str(&self.hashtags(request).await),
                ToolKind::EngagementEstimate => {
                    let input = EngagementInput {
                        topic: request.topic.clone(),
                        niche: request.niche.clone(),
                        platform: request.platform,
                        has_hook: true,
                        has_visuals: true,
                        duration_secs: None,
                        recent_video_count,
                    };
                    let estimate = estimate_engagement(&input, &self.heuristics.engagement);
                    let _ = writeln!(out, "### ENGAGEMENT ESTIMATE:\n{estimate}");
                }
                ToolKind::PostingTime => {
                    let plan = recommend_posting_time(
                        request.platform,
                        &request.niche,
                        &request.audience,
                        &self.heuristics.posting,
                    );
                    let _ = writeln!(out, "### POSTING TIME:\n{plan}");
                }
            }
        }

        out
    }

    async fn channel_reports(&self, channels: &[String]) -> String {
        if channels.is_empty() {
            return "### CHANNELS: No data (no channel names given)\n".to_string();
        }

        let reports = futures::future::join_all(
            channels
                .iter()
                .map(|name| self.providers.youtube.channel_report(name)),
        )
        .await;

        let mut out = String::new();
        for (name, report) in channels.iter().zip(reports) {
            match report {
                Ok(report) => out.push_str(&render_channel_report(&report)),
                Err(e) => unavailable(&mut out, &format!("CHANNEL: {name}"), &e),
            }
        }
        out
    }

    /// Real rising search queries for `topic`.
    ///
    /// # Errors
    ///
    /// Returns the trend provider's [`CollectError`].
    pub async fn rising_queries(&self, topic: &str) -> Result<Vec<String>, CollectError> {
        self.providers.trends.rising_queries(topic).await
    }

    async fn hashtags(&self, request: &ToolRequest) -> String {
        let mut out = String::new();
        let rising = match self.rising_queries(&request.topic).await {
            Ok(rising) => rising,
            Err(e) => {
                tracing::warn!(error = %e, "rising queries unavailable for hashtags");
                let _ = writeln!(out, "Rising queries unavailable: {e}");
                Vec::new()
            }
        };
        let set = generate_hashtags(&request.topic, &request.niche, request.platform, &rising);
        let _ = writeln!(out, "### HASHTAGS:\n{set}");
        out
    }
}

#[cfg(test)]
mod tests {
    use contentai_collect::{
        CollectConfig, RedditClient, SerpClient, TrendsClient, TwitterClient, YouTubeClient,
    };
    use contentai_core::TrendBand;

    use super::*;

    fn toolbox(serp_api_key: Option<&str>, base: &str) -> ToolBox {
        let config = CollectConfig {
            youtube_api_key: None,
            serp_api_key: serp_api_key.map(str::to_string),
            reddit_client_id: None,
            reddit_client_secret: None,
            reddit_user_agent: "contentai-test/0.1".to_string(),
            twitter_bearer_token: None,
            request_timeout_secs: 1,
            user_agent: "contentai-test/0.1".to_string(),
            video_page_size: 10,
            trend_band: TrendBand::default(),
        };
        let providers = ProviderSet {
            youtube: Arc::new(YouTubeClient::with_base_url(&config, base).unwrap()),
            trends: Arc::new(TrendsClient::with_base_url(&config, base).unwrap()),
            serp: Arc::new(SerpClient::with_base_url(&config, base).unwrap()),
            reddit: Arc::new(RedditClient::with_base_urls(&config, base, base).unwrap()),
            twitter: Arc::new(TwitterClient::with_base_url(&config, base).unwrap()),
        };
        ToolBox::new(providers, Arc::new(HeuristicsConfig::default()))
    }

    /// Unroutable base URL and no keys: every credentialed call fails before sending.
    fn offline_toolbox() -> ToolBox {
        toolbox(None, "http://127.0.0.1:9")
    }

    #[tokio::test]
    async fn related_questions_are_capped_like_the_snapshot() {
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        let questions: Vec<_> = (1..=MAX_CONTEXT_QUESTIONS + 2)
            .map(|i| serde_json::json!({"question": format!("Question {i}?")}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("engine", "google"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"related_questions": questions})),
            )
            .mount(&server)
            .await;

        let text = toolbox(Some("serp-key"), &server.uri())
            .gather(
                &[ToolKind::RelatedQuestions],
                &ToolRequest::new("rust", Platform::YouTube),
            )
            .await;

        assert!(text.contains("### PEOPLE ALSO ASK (REAL):\n- Question 1?\n"));
        assert!(text.contains(&format!("- Question {MAX_CONTEXT_QUESTIONS}?\n")));
        assert!(!text.contains(&format!("Question {}?", MAX_CONTEXT_QUESTIONS + 1)));
        assert_eq!(text.matches("- Question ").count(), MAX_CONTEXT_QUESTIONS);
    }

    #[tokio::test]
    async fn missing_credentials_render_as_unavailable() {
        let toolbox = offline_toolbox();
        let request = ToolRequest::new("rust", Platform::YouTube);
        let text = toolbox
            .gather(
                &[ToolKind::VideoSearch, ToolKind::RelatedQuestions, ToolKind::MicroblogSearch],
                &request,
            )
            .await;

        assert!(text.starts_with("## TOOL DATA\n"));
        assert!(text.contains("### TOP VIDEOS: \"rust\": unavailable: YouTube: YOUTUBE_API_KEY not set"));
        assert!(text.contains("### PEOPLE ALSO ASK: unavailable: SerpApi: SERP_API_KEY not set"));
        assert!(text.contains("### SOCIAL POSTS: unavailable:"));
    }

    #[tokio::test]
    async fn heuristic_tools_work_offline() {
        let toolbox = offline_toolbox();
        let mut request = ToolRequest::new("ai automation", Platform::TikTok);
        request.niche = "tech".to_string();
        let text = toolbox
            .gather(
                &[ToolKind::Hashtags, ToolKind::EngagementEstimate, ToolKind::PostingTime],
                &request,
            )
            .await;

        assert!(text.contains("Rising queries unavailable: Google Trends: SERP_API_KEY not set"));
        assert!(text.contains("### HASHTAGS:\nRecommended Hashtags:"));
        assert!(text.contains("0 tags from rising search queries"));
        assert!(text.contains("### ENGAGEMENT ESTIMATE:\nEstimated Engagement Rate:"));
        assert!(text.contains("### POSTING TIME:\nOptimal Posting Time for TikTok:"));
    }

    #[tokio::test]
    async fn channel_report_without_names_says_so() {
        let toolbox = offline_toolbox();
        let request = ToolRequest::new("rust", Platform::YouTube);
        let text = toolbox.gather(&[ToolKind::ChannelReport], &request).await;
        assert!(text.contains("### CHANNELS: No data (no channel names given)"));
    }
}
