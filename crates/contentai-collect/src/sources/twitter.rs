//! Recent-post search against the X (Twitter) API v2.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::http::{build_client, endpoint, lenient_count, parse_base_url, send_json};
use super::{FetchRequest, Provider};
use crate::error::CollectError;
use crate::types::{CollectConfig, MicroPost};

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/";
const PROVIDER: &str = "Twitter";
const MAX_RESULTS: &str = "20";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Tweet>,
    #[serde(default)]
    includes: Includes,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    id: String,
    #[serde(default)]
    text: String,
    author_id: Option<String>,
    #[serde(default)]
    public_metrics: PublicMetrics,
}

#[derive(Debug, Default, Deserialize)]
struct PublicMetrics {
    #[serde(default, deserialize_with = "lenient_count")]
    like_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    retweet_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    reply_count: u64,
}

#[derive(Debug, Default, Deserialize)]
struct Includes {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct User {
    id: String,
    username: String,
}

pub struct TwitterClient {
    client: Client,
    bearer_token: Option<String>,
    base_url: Url,
}

impl TwitterClient {
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
            bearer_token: config.twitter_bearer_token.clone(),
            base_url: parse_base_url(PROVIDER, base_url)?,
        })
    }

    /// English-language original posts (no reposts) from the last seven days.
    ///
    /// # Errors
    ///
    /// - [`CollectError::MissingCredential`] without a bearer token.
    /// - [`CollectError::Empty`] when nothing matches.
    /// - Transport, status, and shape errors.
    pub async fn search_recent(&self, query: &str) -> Result<Vec<MicroPost>, CollectError> {
        let token = self
            .bearer_token
            .as_deref()
            .ok_or(CollectError::MissingCredential {
                provider: PROVIDER,
                var: "TWITTER_BEARER_TOKEN",
            })?;

        let url = endpoint(PROVIDER, &self.base_url, "2/tweets/search/recent")?;
        let full_query = format!("{query} -is:retweet lang:en");
        let request = self.client.get(url).bearer_auth(token).query(&[
            ("query", full_query.as_str()),
            ("max_results", MAX_RESULTS),
            ("tweet.fields", "public_metrics,created_at,author_id"),
            ("expansions", "author_id"),
            ("user.fields", "username"),
        ]);
        let response: SearchResponse = send_json(PROVIDER, "recent search", request).await?;

        let usernames: HashMap<String, String> = response
            .includes
            .users
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        let posts: Vec<MicroPost> = response
            .data
            .into_iter()
            .map(|tweet| {
                let author = tweet
                    .author_id
                    .as_ref()
                    .and_then(|id| usernames.get(id))
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                let url = if author == "unknown" {
                    format!("https://x.com/i/status/{}", tweet.id)
                } else {
                    format!("https://x.com/{author}/status/{}", tweet.id)
                };
                MicroPost {
                    author,
                    text: tweet.text,
                    like_count: tweet.public_metrics.like_count,
                    repost_count: tweet.public_metrics.retweet_count,
                    reply_count: tweet.public_metrics.reply_count,
                    url,
                }
            })
            .collect();

        if posts.is_empty() {
            return Err(CollectError::Empty {
                provider: PROVIDER,
                what: "posts",
                query: query.to_string(),
            });
        }
        Ok(posts)
    }
}

#[async_trait]
impl Provider for TwitterClient {
    type Record = MicroPost;

    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn try_fetch(&self, request: &FetchRequest) -> Result<Vec<MicroPost>, CollectError> {
        self.search_recent(&request.query).await
    }
}
