//! Real-data collection for content generation.
//!
//! Provider clients query video, search-interest, question, news, forum, and
//! micro-post sources. The [`Collector`] runs the three core providers for a
//! topic and returns a [`CollectedSnapshot`], which renders into the
//! deterministic text block that grounds every generation prompt.

pub mod collector;
pub mod context;
pub mod error;
pub mod snapshot;
pub mod sources;
pub mod types;

pub use collector::{Collector, ProviderSet};
pub use context::{
    render_channel_report, render_forum_posts, render_micro_posts, render_news,
    render_search_page, render_trends, render_videos, thousands, to_context, MAX_CONTEXT_QUESTIONS,
    MAX_CONTEXT_RISING_QUERIES, MAX_CONTEXT_VIDEOS,
};
pub use error::{CollectError, ErrorKind};
pub use snapshot::{CollectedSnapshot, SnapshotSummary};
pub use sources::{
    FetchRequest, Provider, RedditClient, SerpClient, TrendsClient, TwitterClient, YouTubeClient,
};
pub use types::{
    ChannelReport, CollectConfig, ForumPost, MicroPost, NewsItem, SearchPage, SearchResult,
    TrendDirection, TrendRecord, VideoRecord,
};
