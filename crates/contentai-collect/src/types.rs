use contentai_core::{AppConfig, TrendBand};
use serde::{Deserialize, Serialize};

/// One video returned by the video provider, with statistics merged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub title: String,
    pub video_id: String,
    pub channel_name: String,
    pub view_count: u64,
    pub like_count: u64,
    /// `YYYY-MM-DD` as reported by the provider.
    pub publish_date: String,
    pub url: String,
}

impl VideoRecord {
    #[must_use]
    pub fn watch_url(video_id: &str) -> String {
        format!("https://youtube.com/watch?v={video_id}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendDirection {
    Rising,
    Declining,
    Stable,
}

impl TrendDirection {
    /// Classify `current` against the mean of `window` using the configured dead band.
    ///
    /// Values exactly on either band edge are `Stable`. The comparison is done
    /// on the window sum in integer thousandths, so a fractional mean cannot
    /// push an edge value across the boundary.
    #[must_use]
    pub fn classify(current: u32, window: &[u32], band: &TrendBand) -> TrendDirection {
        let sum: u128 = window.iter().copied().map(u128::from).sum();
        let count = u128::try_from(window.len()).unwrap_or(u128::MAX);
        let scaled = u128::from(current) * count * 1000;

        if scaled > u128::from(per_mille(band.rising_factor)) * sum {
            TrendDirection::Rising
        } else if scaled < u128::from(per_mille(band.declining_factor)) * sum {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn per_mille(factor: f64) -> u64 {
    (factor.max(0.0) * 1000.0).round() as u64
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Rising => write!(f, "RISING"),
            TrendDirection::Declining => write!(f, "DECLINING"),
            TrendDirection::Stable => write!(f, "STABLE"),
        }
    }
}

/// Search interest for one keyword over the queried window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    pub keyword: String,
    /// Interest at the most recent point, 0-100.
    pub current_interest: u32,
    /// Mean interest over every point in the window, 0-100.
    pub average_interest: f64,
    pub direction: TrendDirection,
    pub rising_queries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// Organic results, related searches, and questions for one web query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub related_searches: Vec<String>,
    pub questions: Vec<String>,
}

impl SearchPage {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.related_searches.is_empty() && self.questions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub source: String,
    pub date: String,
    pub snippet: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumPost {
    pub title: String,
    pub community: String,
    pub score: u64,
    pub comment_count: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicroPost {
    pub author: String,
    pub text: String,
    pub like_count: u64,
    pub repost_count: u64,
    pub reply_count: u64,
    pub url: String,
}

/// Channel-level statistics plus the channel's most recent uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelReport {
    pub channel_id: String,
    pub title: String,
    pub subscriber_count: u64,
    pub total_views: u64,
    pub video_count: u64,
    pub recent_videos: Vec<VideoRecord>,
}

/// Settings shared by the provider clients.
///
/// Credentials are optional; a client with no credential reports
/// `MissingCredential` on every fetch instead of failing construction.
#[derive(Debug, Clone)]
pub struct CollectConfig {
    pub youtube_api_key: Option<String>,
    pub serp_api_key: Option<String>,
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub reddit_user_agent: String,
    pub twitter_bearer_token: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub video_page_size: u32,
    pub trend_band: TrendBand,
}

impl CollectConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig, trend_band: TrendBand) -> Self {
        Self {
            youtube_api_key: config.youtube_api_key.clone(),
            serp_api_key: config.serp_api_key.clone(),
            reddit_client_id: config.reddit_client_id.clone(),
            reddit_client_secret: config.reddit_client_secret.clone(),
            reddit_user_agent: config.reddit_user_agent.clone(),
            twitter_bearer_token: config.twitter_bearer_token.clone(),
            request_timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            video_page_size: config.video_page_size,
            trend_band,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_matches_dead_band() {
        let band = TrendBand::default();
        assert_eq!(
            TrendDirection::classify(80, &[50], &band),
            TrendDirection::Rising
        );
        assert_eq!(
            TrendDirection::classify(56, &[50], &band),
            TrendDirection::Rising
        );
        assert_eq!(
            TrendDirection::classify(44, &[50], &band),
            TrendDirection::Declining
        );
        assert_eq!(
            TrendDirection::classify(50, &[50], &band),
            TrendDirection::Stable
        );
    }

    #[test]
    fn classify_band_edges_are_stable() {
        let band = TrendBand::default();
        // 1.1 * 50 and 0.9 * 50
        assert_eq!(
            TrendDirection::classify(55, &[50], &band),
            TrendDirection::Stable
        );
        assert_eq!(
            TrendDirection::classify(45, &[50], &band),
            TrendDirection::Stable
        );
    }

    #[test]
    fn classify_fractional_mean_edge_is_stable() {
        let band = TrendBand::default();
        // mean is 50/3 and 15 is exactly 0.9 of it
        assert_eq!(
            TrendDirection::classify(15, &[20, 15, 15], &band),
            TrendDirection::Stable
        );
        assert_eq!(
            TrendDirection::classify(14, &[20, 15, 15], &band),
            TrendDirection::Declining
        );
        assert_eq!(
            TrendDirection::classify(19, &[20, 15, 15], &band),
            TrendDirection::Rising
        );
    }

    #[test]
    fn classify_empty_window_is_stable() {
        assert_eq!(
            TrendDirection::classify(40, &[], &TrendBand::default()),
            TrendDirection::Stable
        );
    }

    #[test]
    fn classify_zero_average() {
        let band = TrendBand::default();
        assert_eq!(
            TrendDirection::classify(0, &[0, 0], &band),
            TrendDirection::Stable
        );
        assert_eq!(
            TrendDirection::classify(3, &[0, 0], &band),
            TrendDirection::Rising
        );
    }

    #[test]
    fn classify_uses_configured_band() {
        let band = TrendBand {
            rising_factor: 1.5,
            declining_factor: 0.5,
        };
        assert_eq!(
            TrendDirection::classify(70, &[50], &band),
            TrendDirection::Stable
        );
        assert_eq!(
            TrendDirection::classify(76, &[50], &band),
            TrendDirection::Rising
        );
    }

    #[test]
    fn direction_serializes_uppercase() {
        let json = serde_json::to_string(&TrendDirection::Declining).unwrap();
        assert_eq!(json, "\"DECLINING\"");
        assert_eq!(TrendDirection::Rising.to_string(), "RISING");
    }
}
