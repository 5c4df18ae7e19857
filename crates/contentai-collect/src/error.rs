use thiserror::Error;

/// Failure category used to decide how a provider failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A credential the provider needs is not configured.
    ConfigurationMissing,
    /// The provider answered but had no usable records.
    UpstreamEmpty,
    /// Timeout, rate limiting, 5xx, or a connection failure.
    UpstreamTransient,
    /// The provider rejected the request (error payload or 4xx).
    UpstreamRejected,
    /// The response did not have the expected shape.
    Malformed,
}

/// Errors raised inside a provider client.
///
/// These never escape [`crate::Provider::fetch`]; they are rendered with
/// `Display` into the snapshot's error list. Every message names its provider.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("{provider}: {var} not set")]
    MissingCredential {
        provider: &'static str,
        var: &'static str,
    },

    #[error("{provider}: no {what} found for '{query}'")]
    Empty {
        provider: &'static str,
        what: &'static str,
        query: String,
    },

    #[error("{provider}: request timed out")]
    Timeout { provider: &'static str },

    #[error("{provider}: rate limited (HTTP 429)")]
    RateLimited { provider: &'static str },

    #[error("{provider}: service unavailable (HTTP {status})")]
    Unavailable { provider: &'static str, status: u16 },

    #[error("{provider}: request failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API error: {message}")]
    Api {
        provider: &'static str,
        message: String,
    },

    #[error("{provider}: unexpected response for {context}: {source}")]
    Malformed {
        provider: &'static str,
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider}: invalid base URL '{url}'")]
    InvalidBaseUrl { provider: &'static str, url: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl CollectError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            CollectError::MissingCredential { .. }
            | CollectError::InvalidBaseUrl { .. }
            | CollectError::Client(_) => ErrorKind::ConfigurationMissing,
            CollectError::Empty { .. } => ErrorKind::UpstreamEmpty,
            CollectError::Timeout { .. }
            | CollectError::RateLimited { .. }
            | CollectError::Unavailable { .. }
            | CollectError::Http { .. } => ErrorKind::UpstreamTransient,
            CollectError::Api { .. } => ErrorKind::UpstreamRejected,
            CollectError::Malformed { .. } => ErrorKind::Malformed,
        }
    }

    /// Wrap a transport error, separating timeouts from other failures.
    pub(crate) fn from_transport(provider: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            CollectError::Timeout { provider }
        } else {
            CollectError::Http { provider, source }
        }
    }
}
