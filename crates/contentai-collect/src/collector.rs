use std::sync::Arc;

use chrono::Utc;
use contentai_core::Platform;

use crate::error::CollectError;
use crate::snapshot::CollectedSnapshot;
use crate::sources::{
    FetchRequest, Provider, RedditClient, SerpClient, TrendsClient, TwitterClient, YouTubeClient,
};
use crate::types::{CollectConfig, TrendRecord, VideoRecord};

/// Every provider client, built once from configuration and shared.
#[derive(Clone)]
pub struct ProviderSet {
    pub youtube: Arc<YouTubeClient>,
    pub trends: Arc<TrendsClient>,
    pub serp: Arc<SerpClient>,
    pub reddit: Arc<RedditClient>,
    pub twitter: Arc<TwitterClient>,
}

impl ProviderSet {
    /// # Errors
    ///
    /// Returns [`CollectError::Client`] if an HTTP client cannot be built.
    pub fn from_config(config: &CollectConfig) -> Result<Self, CollectError> {
        Ok(Self {
            youtube: Arc::new(YouTubeClient::new(config)?),
            trends: Arc::new(TrendsClient::new(config)?),
            serp: Arc::new(SerpClient::new(config)?),
            reddit: Arc::new(RedditClient::new(config)?),
            twitter: Arc::new(TwitterClient::new(config)?),
        })
    }
}

/// Gathers videos, trends, and questions for a topic into one snapshot.
#[derive(Clone)]
pub struct Collector {
    video: Arc<dyn Provider<Record = VideoRecord>>,
    trends: Arc<dyn Provider<Record = TrendRecord>>,
    questions: Arc<dyn Provider<Record = String>>,
}

impl Collector {
    pub fn new(
        video: Arc<dyn Provider<Record = VideoRecord>>,
        trends: Arc<dyn Provider<Record = TrendRecord>>,
        questions: Arc<dyn Provider<Record = String>>,
    ) -> Self {
        Self {
            video,
            trends,
            questions,
        }
    }

    #[must_use]
    pub fn from_providers(providers: &ProviderSet) -> Self {
        Self::new(
            providers.youtube.clone(),
            providers.trends.clone(),
            providers.serp.clone(),
        )
    }

    /// Query every provider for `topic` and assemble the snapshot.
    ///
    /// The three providers run concurrently, each into its own error list.
    /// The lists are joined in the fixed order video, trends, questions, so the
    /// snapshot does not depend on which provider finishes first. Failed
    /// providers are never retried here.
    pub async fn collect(&self, topic: &str, platform: &str) -> CollectedSnapshot {
        let request = FetchRequest::new(topic);
        let video_request = request.clone().for_platform(Platform::from_label(platform));

        let mut video_errors = Vec::new();
        let mut trend_errors = Vec::new();
        let mut question_errors = Vec::new();

        let (videos, trends, questions) = tokio::join!(
            self.video.fetch(&video_request, &mut video_errors),
            self.trends.fetch(&request, &mut trend_errors),
            self.questions.fetch(&request, &mut question_errors),
        );

        let mut errors = video_errors;
        errors.extend(trend_errors);
        errors.extend(question_errors);

        tracing::info!(
            topic,
            platform,
            videos = videos.len(),
            trends = trends.len(),
            questions = questions.len(),
            errors = errors.len(),
            "collection complete"
        );

        CollectedSnapshot::new(topic, platform, Utc::now())
            .with_videos(videos)
            .with_trends(trends)
            .with_questions(questions)
            .with_errors(errors)
    }
}
