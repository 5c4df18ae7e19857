//! Video search and statistics client for the `YouTube` Data API v3.

use std::collections::HashMap;

use async_trait::async_trait;
use contentai_core::Platform;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::http::{build_client, endpoint, lenient_count, parse_base_url, send_json};
use super::{FetchRequest, Provider};
use crate::error::CollectError;
use crate::types::{ChannelReport, CollectConfig, VideoRecord};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";
const PROVIDER: &str = "YouTube";
const RECENT_UPLOADS: u32 = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: SearchItemId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
    channel_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: String,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    #[serde(default)]
    statistics: VideoStatistics,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    #[serde(default, deserialize_with = "lenient_count")]
    view_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    like_count: u64,
}

#[derive(Debug, Deserialize)]
struct ChannelsResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    id: String,
    #[serde(default)]
    snippet: Snippet,
    #[serde(default)]
    statistics: ChannelStatistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelStatistics {
    #[serde(default, deserialize_with = "lenient_count")]
    subscriber_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    view_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    video_count: u64,
}

/// Client for video search plus batched statistics lookup.
///
/// Use [`YouTubeClient::new`] for production or [`YouTubeClient::with_base_url`]
/// to point at a mock server in tests.
pub struct YouTubeClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
    page_size: u32,
}

impl YouTubeClient {
    /// # Errors
    ///
    /// Returns [`CollectError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &CollectConfig) -> Result<Self, CollectError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`CollectError::Client`] if the HTTP client cannot be built, or
    /// [`CollectError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(config: &CollectConfig, base_url: &str) -> Result<Self, CollectError> {
        Ok(Self {
            client: build_client(config.request_timeout_secs, &config.user_agent)?,
            api_key: config.youtube_api_key.clone(),
            base_url: parse_base_url(PROVIDER, base_url)?,
            page_size: config.video_page_size,
        })
    }

    fn api_key(&self) -> Result<&str, CollectError> {
        self.api_key
            .as_deref()
            .ok_or(CollectError::MissingCredential {
                provider: PROVIDER,
                var: "YOUTUBE_API_KEY",
            })
    }

    /// Most-viewed videos for `query`, with view and like counts merged in.
    ///
    /// Short-form platforms restrict the search to short uploads.
    ///
    /// # Errors
    ///
    /// - [`CollectError::MissingCredential`] without an API key.
    /// - [`CollectError::Empty`] when the search yields no videos.
    /// - Transport, status, and shape errors from either request.
    pub async fn search_videos(
        &self,
        query: &str,
        platform: Option<Platform>,
    ) -> Result<Vec<VideoRecord>, CollectError> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("q", query.to_string()),
            ("type", "video".to_string()),
            ("order", "viewCount".to_string()),
            ("maxResults", self.page_size.to_string()),
        ];
        if platform.is_some_and(Platform::is_short_form) {
            params.push(("videoDuration", "short".to_string()));
        }

        let items = self.search(&params, "search").await?;
        let videos = self.with_statistics(items).await?;
        if videos.is_empty() {
            return Err(CollectError::Empty {
                provider: PROVIDER,
                what: "videos",
                query: query.to_string(),
            });
        }
        Ok(videos)
    }

    /// Channel statistics plus its most recent uploads for a channel name.
    ///
    /// # Errors
    ///
    /// - [`CollectError::MissingCredential`] without an API key.
    /// - [`CollectError::Empty`] when no channel matches `channel`.
    /// - Transport, status, and shape errors from any request.
    pub async fn channel_report(&self, channel: &str) -> Result<ChannelReport, CollectError> {
        let not_found = || CollectError::Empty {
            provider: PROVIDER,
            what: "channel",
            query: channel.to_string(),
        };

        let matches = self
            .search(
                &[
                    ("part", "snippet".to_string()),
                    ("q", channel.to_string()),
                    ("type", "channel".to_string()),
                    ("maxResults", "1".to_string()),
                ],
                "channel search",
            )
            .await?;
        let channel_id = matches
            .into_iter()
            .find_map(|item| item.id.channel_id)
            .ok_or_else(not_found)?;

        let key = self.api_key()?;
        let url = endpoint(PROVIDER, &self.base_url, "channels")?;
        let request = self.client.get(url).query(&[
            ("part", "snippet,statistics"),
            ("id", channel_id.as_str()),
            ("key", key),
        ]);
        let channels: ChannelsResponse = send_json(PROVIDER, "channels", request).await?;
        let info = channels.items.into_iter().next().ok_or_else(not_found)?;

        let uploads = self
            .search(
                &[
                    ("part", "snippet".to_string()),
                    ("channelId", info.id.clone()),
                    ("type", "video".to_string()),
                    ("order", "date".to_string()),
                    ("maxResults", RECENT_UPLOADS.to_string()),
                ],
                "channel uploads",
            )
            .await?;
        let recent_videos = self.with_statistics(uploads).await?;

        Ok(ChannelReport {
            channel_id: info.id,
            title: unescape_html(&info.snippet.title),
            subscriber_count: info.statistics.subscriber_count,
            total_views: info.statistics.view_count,
            video_count: info.statistics.video_count,
            recent_videos,
        })
    }

    async fn search(
        &self,
        params: &[(&str, String)],
        context: &str,
    ) -> Result<Vec<SearchItem>, CollectError> {
        let key = self.api_key()?;
        let url = endpoint(PROVIDER, &self.base_url, "search")?;
        let request = self.client.get(url).query(params).query(&[("key", key)]);
        let response: SearchResponse = send_json(PROVIDER, context, request).await?;
        Ok(response.items)
    }

    /// Look up statistics for every video item and merge them by id.
    ///
    /// Items without a video id are skipped. A video missing from the
    /// statistics response keeps zero counts rather than being dropped.
    async fn with_statistics(
        &self,
        items: Vec<SearchItem>,
    ) -> Result<Vec<VideoRecord>, CollectError> {
        let candidates: Vec<(String, Snippet)> = items
            .into_iter()
            .filter_map(|item| item.id.video_id.map(|id| (id, item.snippet)))
            .collect();
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let ids = candidates
            .iter()
            .map(|(id, _)| id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let key = self.api_key()?;
        let url = endpoint(PROVIDER, &self.base_url, "videos")?;
        let request = self
            .client
            .get(url)
            .query(&[("part", "statistics"), ("id", ids.as_str()), ("key", key)]);
        let response: VideosResponse = send_json(PROVIDER, "videos", request).await?;

        let stats: HashMap<String, VideoStatistics> = response
            .items
            .into_iter()
            .map(|item| (item.id, item.statistics))
            .collect();

        Ok(candidates
            .into_iter()
            .map(|(video_id, snippet)| {
                let counts = stats.get(&video_id).copied().unwrap_or_default();
                VideoRecord {
                    title: unescape_html(&snippet.title),
                    channel_name: unescape_html(&snippet.channel_title),
                    view_count: counts.view_count,
                    like_count: counts.like_count,
                    publish_date: snippet.published_at.chars().take(10).collect(),
                    url: VideoRecord::watch_url(&video_id),
                    video_id,
                }
            })
            .collect())
    }
}

#[async_trait]
impl Provider for YouTubeClient {
    type Record = VideoRecord;

    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn try_fetch(&self, request: &FetchRequest) -> Result<Vec<VideoRecord>, CollectError> {
        self.search_videos(&request.query, request.platform).await
    }
}

/// Undo the HTML entity escaping the search API applies to snippet text.
fn unescape_html(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    raw.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
