//! Search-interest client backed by the `SerpApi` Google Trends engine.

use async_trait::async_trait;
use contentai_core::TrendBand;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::http::{build_client, count_from_value, endpoint, parse_base_url, send_json};
use super::{FetchRequest, Provider};
use crate::error::CollectError;
use crate::types::{CollectConfig, TrendDirection, TrendRecord};

const DEFAULT_BASE_URL: &str = "https://serpapi.com";
const PROVIDER: &str = "Google Trends";
const WINDOW: &str = "today 3-m";
/// Upper bound on comma-separated keywords the trends engine compares at once.
pub const MAX_KEYWORDS: usize = 5;
const MAX_RISING_QUERIES: usize = 10;

#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    #[serde(default)]
    interest_over_time: Option<InterestOverTime>,
}

#[derive(Debug, Deserialize)]
struct InterestOverTime {
    #[serde(default)]
    timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize)]
struct TimelinePoint {
    #[serde(default)]
    values: Vec<PointValue>,
}

#[derive(Debug, Deserialize)]
struct PointValue {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    extracted_value: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RelatedResponse {
    #[serde(default)]
    related_queries: Option<RelatedQueries>,
}

#[derive(Debug, Deserialize)]
struct RelatedQueries {
    #[serde(default)]
    rising: Vec<RelatedQuery>,
}

#[derive(Debug, Deserialize)]
struct RelatedQuery {
    query: Option<String>,
}

pub struct TrendsClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
    band: TrendBand,
}

impl TrendsClient {
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
            band: config.trend_band,
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

    /// Interest over the last three months for up to [`MAX_KEYWORDS`] keywords.
    ///
    /// Returns one record per keyword that appears in the timeline. Rising
    /// queries come from a second request per keyword; when that request fails
    /// the record keeps an empty list and the failure is only logged.
    ///
    /// # Errors
    ///
    /// - [`CollectError::MissingCredential`] without an API key.
    /// - [`CollectError::Empty`] when no keyword has any timeline points.
    /// - Transport, status, and shape errors from the timeline request.
    pub async fn interest(&self, keywords: &[String]) -> Result<Vec<TrendRecord>, CollectError> {
        let keywords: Vec<&str> = keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .take(MAX_KEYWORDS)
            .collect();
        let joined = keywords.join(",");

        let key = self.api_key()?;
        if keywords.is_empty() {
            return Err(CollectError::Empty {
                provider: PROVIDER,
                what: "keywords",
                query: joined,
            });
        }
        let request = self.client.get(self.search_url()?).query(&[
            ("engine", "google_trends"),
            ("q", joined.as_str()),
            ("data_type", "TIMESERIES"),
            ("date", WINDOW),
            ("api_key", key),
        ]);
        let response: TimeseriesResponse = send_json(PROVIDER, "timeseries", request).await?;
        let timeline = response
            .interest_over_time
            .map(|i| i.timeline_data)
            .unwrap_or_default();

        let mut records = Vec::new();
        for (position, keyword) in keywords.iter().enumerate() {
            let points = series_for(&timeline, keyword, position, keywords.len());
            let Some(&current) = points.last() else {
                continue;
            };
            let average = mean(&points);
            let rising_queries = match self.rising_queries(keyword).await {
                Ok(queries) => queries,
                Err(e) => {
                    tracing::warn!(
                        provider = PROVIDER,
                        keyword = %keyword,
                        error = %e,
                        "rising queries unavailable"
                    );
                    Vec::new()
                }
            };

            records.push(TrendRecord {
                keyword: (*keyword).to_string(),
                current_interest: current,
                average_interest: average,
                direction: TrendDirection::classify(current, &points, &self.band),
                rising_queries,
            });
        }

        if records.is_empty() {
            return Err(CollectError::Empty {
                provider: PROVIDER,
                what: "interest data",
                query: joined,
            });
        }
        Ok(records)
    }

    /// Rising related queries for one keyword, capped at ten.
    ///
    /// # Errors
    ///
    /// Returns a [`CollectError`] for a missing key, transport, status, or shape failure.
    pub async fn rising_queries(&self, keyword: &str) -> Result<Vec<String>, CollectError> {
        let key = self.api_key()?;
        let request = self.client.get(self.search_url()?).query(&[
            ("engine", "google_trends"),
            ("q", keyword),
            ("data_type", "RELATED_QUERIES"),
            ("date", WINDOW),
            ("api_key", key),
        ]);
        let response: RelatedResponse = send_json(PROVIDER, "related queries", request).await?;
        Ok(response
            .related_queries
            .map(|r| r.rising)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|q| q.query)
            .filter(|q| !q.trim().is_empty())
            .take(MAX_RISING_QUERIES)
            .collect())
    }
}

#[async_trait]
impl Provider for TrendsClient {
    type Record = TrendRecord;

    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn try_fetch(&self, request: &FetchRequest) -> Result<Vec<TrendRecord>, CollectError> {
        self.interest(std::slice::from_ref(&request.query)).await
    }
}

/// Values for one keyword across the timeline.
///
/// Matches on the `query` label; when a point carries no labels, falls back to
/// the keyword's position in the request.
fn series_for(timeline: &[TimelinePoint], keyword: &str, position: usize, total: usize) -> Vec<u32> {
    timeline
        .iter()
        .filter_map(|point| {
            let labelled = point.values.iter().find(|v| {
                v.query
                    .as_deref()
                    .is_some_and(|q| q.trim().eq_ignore_ascii_case(keyword))
            });
            let value = match labelled {
                Some(v) => Some(v),
                None if point.values.len() == total => point.values.get(position),
                None => None,
            }?;
            Some(u32::try_from(count_from_value(&value.extracted_value)).unwrap_or(u32::MAX))
        })
        .collect()
}

fn mean(points: &[u32]) -> f64 {
    let sum: f64 = points.iter().copied().map(f64::from).sum();
    let count = f64::from(u32::try_from(points.len()).unwrap_or(u32::MAX));
    sum / count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline(json: serde_json::Value) -> Vec<TimelinePoint> {
        serde_json::from_value::<InterestOverTime>(json)
            .unwrap()
            .timeline_data
    }

    #[test]
    fn series_matches_query_labels() {
        let points = timeline(serde_json::json!({
            "timeline_data": [
                {"values": [{"query": "rust", "extracted_value": 40}, {"query": "go", "extracted_value": 70}]},
                {"values": [{"query": "rust", "extracted_value": 60}, {"query": "go", "extracted_value": 65}]}
            ]
        }));
        assert_eq!(series_for(&points, "rust", 0, 2), vec![40, 60]);
        assert_eq!(series_for(&points, "Go", 1, 2), vec![70, 65]);
    }

    #[test]
    fn series_falls_back_to_position() {
        let points = timeline(serde_json::json!({
            "timeline_data": [{"values": [{"extracted_value": 12}]}]
        }));
        assert_eq!(series_for(&points, "rust", 0, 1), vec![12]);
    }

    #[test]
    fn mean_is_exact() {
        assert!((mean(&[40, 60, 50]) - 50.0).abs() < f64::EPSILON);
        assert!((mean(&[1, 2]) - 1.5).abs() < f64::EPSILON);
    }
}
