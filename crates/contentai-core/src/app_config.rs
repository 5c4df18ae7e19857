use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Presence of one named provider credential. Never carries the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialStatus {
    pub name: &'static str,
    pub present: bool,
    /// Whether the grounded script flow cannot run without it.
    pub required: bool,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Bearer tokens accepted by the HTTP API, trimmed and deduplicated.
    pub api_keys: Vec<String>,
    pub personas_path: Option<PathBuf>,
    pub heuristics_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub video_page_size: u32,
    pub youtube_api_key: Option<String>,
    pub serp_api_key: Option<String>,
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub reddit_user_agent: String,
    pub twitter_bearer_token: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub model: String,
    pub generation_max_tokens: u32,
    pub generation_timeout_secs: u64,
}

impl AppConfig {
    /// Report which provider and generation credentials are configured.
    #[must_use]
    pub fn credential_status(&self) -> Vec<CredentialStatus> {
        vec![
            CredentialStatus {
                name: "ANTHROPIC_API_KEY",
                present: self.anthropic_api_key.is_some(),
                required: true,
            },
            CredentialStatus {
                name: "YOUTUBE_API_KEY",
                present: self.youtube_api_key.is_some(),
                required: true,
            },
            CredentialStatus {
                name: "SERP_API_KEY",
                present: self.serp_api_key.is_some(),
                required: true,
            },
            CredentialStatus {
                name: "REDDIT_CLIENT_ID",
                present: self.reddit_client_id.is_some() && self.reddit_client_secret.is_some(),
                required: false,
            },
            CredentialStatus {
                name: "TWITTER_BEARER_TOKEN",
                present: self.twitter_bearer_token.is_some(),
                required: false,
            },
        ]
    }

    /// True when every credential the grounded script flow needs is present.
    #[must_use]
    pub fn is_fully_configured(&self) -> bool {
        self.credential_status()
            .iter()
            .filter(|c| c.required)
            .all(|c| c.present)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "api_keys",
                &format_args!("[{} redacted]", self.api_keys.len()),
            )
            .field("personas_path", &self.personas_path)
            .field("heuristics_path", &self.heuristics_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("video_page_size", &self.video_page_size)
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "serp_api_key",
                &self.serp_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "reddit_client_id",
                &self.reddit_client_id.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "reddit_client_secret",
                &self.reddit_client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("reddit_user_agent", &self.reddit_user_agent)
            .field(
                "twitter_bearer_token",
                &self.twitter_bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("model", &self.model)
            .field("generation_max_tokens", &self.generation_max_tokens)
            .field("generation_timeout_secs", &self.generation_timeout_secs)
            .finish()
    }
}
