//! Search-engine results client backed by `SerpApi` (Google web and news engines).

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::http::{build_client, endpoint, parse_base_url, send_json};
use super::{FetchRequest, Provider};
use crate::error::CollectError;
use crate::types::{CollectConfig, NewsItem, SearchPage, SearchResult};

const DEFAULT_BASE_URL: &str = "https://serpapi.com";
const PROVIDER: &str = "SerpApi";
const MAX_ORGANIC: usize = 10;
const MAX_RELATED_SEARCHES: usize = 5;
const MAX_NEWS: usize = 15;

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    #[serde(default)]
    related_questions: Vec<RelatedQuestion>,
    #[serde(default)]
    related_searches: Vec<RelatedSearch>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

#[derive(Debug, Deserialize)]
struct RelatedQuestion {
    question: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RelatedSearch {
    query: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    news_results: Vec<NewsResult>,
}

#[derive(Debug, Deserialize)]
struct NewsResult {
    #[serde(default)]
    title: String,
    /// Either a plain name or an object with a `name` field.
    #[serde(default)]
    source: serde_json::Value,
    #[serde(default)]
    date: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

/// Client for "people also ask" questions, organic results, and news.
pub struct SerpClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl SerpClient {
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
            api_key: config.serp_api_key.clone(),
            base_url: parse_base_url(PROVIDER, base_url)?,
        })
    }

    fn search_url(&self) -> Result<Url, CollectError> {
        endpoint(PROVIDER, &self.base_url, "search")
    }

    fn api_key(&self) -> Result<&str, CollectError> {
        self.api_key
            .as_deref()
            .ok_or(CollectError::MissingCredential {
                provider: PROVIDER,
                var: "SERP_API_KEY",
            })
    }

    async fn google(&self, query: &str) -> Result<GoogleResponse, CollectError> {
        let key = self.api_key()?;
        let request = self.client.get(self.search_url()?).query(&[
            ("engine", "google"),
            ("q", query),
            ("api_key", key),
        ]);
        send_json(PROVIDER, "google search", request).await
    }

    /// "People also ask" questions in the order the engine returned them.
    ///
    /// # Errors
    ///
    /// - [`CollectError::MissingCredential`] without an API key.
    /// - [`CollectError::Empty`] when the page has no related questions.
    /// - Transport, status, API, and shape errors.
    pub async fn related_questions(&self, query: &str) -> Result<Vec<String>, CollectError> {
        let response = self.google(query).await?;
        let questions = collect_questions(response.related_questions);
        if questions.is_empty() {
            return Err(CollectError::Empty {
                provider: PROVIDER,
                what: "related questions",
                query: query.to_string(),
            });
        }
        Ok(questions)
    }

    /// Organic results, related searches, and questions for one query.
    ///
    /// # Errors
    ///
    /// - [`CollectError::MissingCredential`] without an API key.
    /// - [`CollectError::Empty`] when the page has nothing at all.
    /// - Transport, status, API, and shape errors.
    pub async fn web_search(&self, query: &str) -> Result<SearchPage, CollectError> {
        let response = self.google(query).await?;
        let page = SearchPage {
            query: query.to_string(),
            results: response
                .organic_results
                .into_iter()
                .filter(|r| !r.title.trim().is_empty())
                .take(MAX_ORGANIC)
                .map(|r| SearchResult {
                    title: r.title,
                    snippet: r.snippet,
                    link: r.link,
                })
                .collect(),
            related_searches: response
                .related_searches
                .into_iter()
                .filter_map(|s| s.query)
                .take(MAX_RELATED_SEARCHES)
                .collect(),
            questions: collect_questions(response.related_questions),
        };
        if page.is_empty() {
            return Err(CollectError::Empty {
                provider: PROVIDER,
                what: "search results",
                query: query.to_string(),
            });
        }
        Ok(page)
    }

    /// Recent news articles for `query`, capped at fifteen.
    ///
    /// # Errors
    ///
    /// - [`CollectError::MissingCredential`] without an API key.
    /// - [`CollectError::Empty`] when no article is returned.
    /// - Transport, status, API, and shape errors.
    pub async fn news(&self, query: &str) -> Result<Vec<NewsItem>, CollectError> {
        let key = self.api_key()?;
        let request = self.client.get(self.search_url()?).query(&[
            ("engine", "google_news"),
            ("q", query),
            ("gl", "us"),
            ("hl", "en"),
            ("api_key", key),
        ]);
        let response: NewsResponse = send_json(PROVIDER, "google news", request).await?;

        let items: Vec<NewsItem> = response
            .news_results
            .into_iter()
            .filter(|n| !n.title.trim().is_empty())
            .take(MAX_NEWS)
            .map(|n| NewsItem {
                source: source_name(&n.source),
                title: n.title,
                date: n.date,
                snippet: n.snippet,
                link: n.link,
            })
            .collect();

        if items.is_empty() {
            return Err(CollectError::Empty {
                provider: PROVIDER,
                what: "news articles",
                query: query.to_string(),
            });
        }
        Ok(items)
    }
}

#[async_trait]
impl Provider for SerpClient {
    type Record = String;

    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn try_fetch(&self, request: &FetchRequest) -> Result<Vec<String>, CollectError> {
        self.related_questions(&request.query).await
    }
}

fn collect_questions(related: Vec<RelatedQuestion>) -> Vec<String> {
    related
        .into_iter()
        .filter_map(|q| q.question)
        .filter(|q| !q.trim().is_empty())
        .collect()
}

fn source_name(source: &serde_json::Value) -> String {
    match source {
        serde_json::Value::String(name) => name.clone(),
        serde_json::Value::Object(obj) => obj
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("Unknown")
            .to_string(),
        _ => "Unknown".to_string(),
    }
}
