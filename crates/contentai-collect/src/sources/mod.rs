//! Provider clients and the capability trait the collector drives them through.

pub(crate) mod http;
mod reddit;
mod serp;
mod trends;
mod twitter;
mod youtube;

pub use reddit::RedditClient;
pub use serp::SerpClient;
pub use trends::TrendsClient;
pub use twitter::TwitterClient;
pub use youtube::YouTubeClient;

use async_trait::async_trait;
use contentai_core::Platform;

use crate::error::CollectError;

/// What a provider is asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub query: String,
    /// Target platform, for providers that qualify their search by it.
    pub platform: Option<Platform>,
}

impl FetchRequest {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            platform: None,
        }
    }

    #[must_use]
    pub fn for_platform(mut self, platform: Option<Platform>) -> Self {
        self.platform = platform;
        self
    }
}

/// A source of records for one query.
///
/// Implementors only write [`Provider::try_fetch`]. Callers use
/// [`Provider::fetch`], which never fails: any error becomes exactly one
/// message appended to `errors` and an empty result.
#[async_trait]
pub trait Provider: Send + Sync {
    type Record: Send;

    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns a [`CollectError`] naming this provider for any failure,
    /// including an upstream answer with zero usable records.
    async fn try_fetch(&self, request: &FetchRequest) -> Result<Vec<Self::Record>, CollectError>;

    async fn fetch(&self, request: &FetchRequest, errors: &mut Vec<String>) -> Vec<Self::Record> {
        match self.try_fetch(request).await {
            Ok(records) => {
                tracing::debug!(
                    provider = self.name(),
                    query = %request.query,
                    count = records.len(),
                    "provider fetch succeeded"
                );
                records
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.name(),
                    query = %request.query,
                    kind = ?e.kind(),
                    error = %e,
                    "provider fetch failed"
                );
                errors.push(e.to_string());
                Vec::new()
            }
        }
    }
}
