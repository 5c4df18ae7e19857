//! Reddit search client.
//!
//! Uses client-credentials OAuth when a client id and secret are configured,
//! otherwise the public JSON listing. Both paths return the same post shape.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::http::{build_client, endpoint, lenient_count, parse_base_url, send_json};
use super::{FetchRequest, Provider};
use crate::error::CollectError;
use crate::types::{CollectConfig, ForumPost};

const DEFAULT_AUTH_BASE: &str = "https://www.reddit.com/";
const DEFAULT_API_BASE: &str = "https://oauth.reddit.com/";
const PROVIDER: &str = "Reddit";
const PAGE_LIMIT: &str = "25";

/// Reddit OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reddit search listing wrapper.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    subreddit: String,
    #[serde(default, deserialize_with = "lenient_count")]
    score: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    num_comments: u64,
    #[serde(default)]
    permalink: String,
}

struct Credentials {
    client_id: String,
    client_secret: String,
}

pub struct RedditClient {
    client: Client,
    credentials: Option<Credentials>,
    auth_base: Url,
    api_base: Url,
}

impl RedditClient {
    /// # Errors
    ///
    /// Returns [`CollectError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &CollectConfig) -> Result<Self, CollectError> {
        Self::with_base_urls(config, DEFAULT_AUTH_BASE, DEFAULT_API_BASE)
    }

    /// Point the token/public endpoints and the OAuth API at custom hosts.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Client`] if the HTTP client cannot be built, or
    /// [`CollectError::InvalidBaseUrl`] if either URL does not parse.
    pub fn with_base_urls(
        config: &CollectConfig,
        auth_base: &str,
        api_base: &str,
    ) -> Result<Self, CollectError> {
        let credentials = match (&config.reddit_client_id, &config.reddit_client_secret) {
            (Some(id), Some(secret)) => Some(Credentials {
                client_id: id.clone(),
                client_secret: secret.clone(),
            }),
            _ => None,
        };

        Ok(Self {
            client: build_client(config.request_timeout_secs, &config.reddit_user_agent)?,
            credentials,
            auth_base: parse_base_url(PROVIDER, auth_base)?,
            api_base: parse_base_url(PROVIDER, api_base)?,
        })
    }

    async fn fetch_token(&self, credentials: &Credentials) -> Result<String, CollectError> {
        let url = endpoint(PROVIDER, &self.auth_base, "api/v1/access_token")?;
        let request = self
            .client
            .post(url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")]);
        let token: TokenResponse = send_json(PROVIDER, "token exchange", request).await?;
        Ok(token.access_token)
    }

    /// Posts from the last month matching `query`, most relevant first.
    ///
    /// # Errors
    ///
    /// - [`CollectError::Empty`] when the listing has no posts.
    /// - Token exchange, transport, status, and shape errors.
    pub async fn search(&self, query: &str) -> Result<Vec<ForumPost>, CollectError> {
        let params = [
            ("q", query),
            ("sort", "relevance"),
            ("t", "month"),
            ("type", "link"),
            ("limit", PAGE_LIMIT),
        ];

        let request = if let Some(credentials) = &self.credentials {
            let token = self.fetch_token(credentials).await?;
            let url = endpoint(PROVIDER, &self.api_base, "search")?;
            self.client.get(url).bearer_auth(token).query(&params)
        } else {
            let url = endpoint(PROVIDER, &self.auth_base, "search.json")?;
            self.client.get(url).query(&params)
        };

        let listing: Listing = send_json(PROVIDER, "search", request).await?;
        let posts: Vec<ForumPost> = listing
            .data
            .children
            .into_iter()
            .map(|post| post.data)
            .filter(|data| !data.title.trim().is_empty())
            .map(|data| ForumPost {
                url: format!("https://www.reddit.com{}", data.permalink),
                title: data.title,
                community: data.subreddit,
                score: data.score,
                comment_count: data.num_comments,
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
impl Provider for RedditClient {
    type Record = ForumPost;

    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn try_fetch(&self, request: &FetchRequest) -> Result<Vec<ForumPost>, CollectError> {
        self.search(&request.query).await
    }
}
