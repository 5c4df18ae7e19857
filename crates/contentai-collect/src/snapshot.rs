use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{TrendRecord, VideoRecord};

/// Everything collected for one (topic, platform) request.
///
/// Built once by the [`crate::Collector`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectedSnapshot {
    topic: String,
    platform: String,
    collected_at: DateTime<Utc>,
    videos: Vec<VideoRecord>,
    trends: Vec<TrendRecord>,
    questions: Vec<String>,
    errors: Vec<String>,
}

impl CollectedSnapshot {
    #[must_use]
    pub fn new(
        topic: impl Into<String>,
        platform: impl Into<String>,
        collected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            topic: topic.into(),
            platform: platform.into(),
            collected_at,
            videos: Vec::new(),
            trends: Vec::new(),
            questions: Vec::new(),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_videos(mut self, videos: Vec<VideoRecord>) -> Self {
        self.videos = videos;
        self
    }

    #[must_use]
    pub fn with_trends(mut self, trends: Vec<TrendRecord>) -> Self {
        self.trends = trends;
        self
    }

    #[must_use]
    pub fn with_questions(mut self, questions: Vec<String>) -> Self {
        self.questions = questions;
        self
    }

    #[must_use]
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    /// True when at least one provider produced records, even if others failed.
    #[must_use]
    pub fn has_data(&self) -> bool {
        !(self.videos.is_empty() && self.trends.is_empty() && self.questions.is_empty())
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    #[must_use]
    pub fn collected_at(&self) -> DateTime<Utc> {
        self.collected_at
    }

    #[must_use]
    pub fn videos(&self) -> &[VideoRecord] {
        &self.videos
    }

    #[must_use]
    pub fn trends(&self) -> &[TrendRecord] {
        &self.trends
    }

    #[must_use]
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Counts and errors, for callers that report on a collection without the full context.
    #[must_use]
    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            topic: self.topic.clone(),
            platform: self.platform.clone(),
            collected_at: self.collected_at,
            video_count: self.videos.len(),
            trend_count: self.trends.len(),
            question_count: self.questions.len(),
            errors: self.errors.clone(),
            has_data: self.has_data(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    pub topic: String,
    pub platform: String,
    pub collected_at: DateTime<Utc>,
    pub video_count: usize,
    pub trend_count: usize,
    pub question_count: usize,
    pub errors: Vec<String>,
    pub has_data: bool,
}
