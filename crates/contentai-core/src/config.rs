use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";
const MAX_VIDEO_PAGE_SIZE: u32 = 50;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Provider credentials are all optional: a missing key degrades the matching
/// provider at collection time instead of failing startup. Tests pass a
/// `HashMap` lookup instead of touching the process environment.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("CONTENTAI_ENV", "development"));

    let bind_addr = parse_addr("CONTENTAI_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("CONTENTAI_LOG_LEVEL", "info");
    let api_keys = parse_api_keys(&or_default("CONTENTAI_API_KEYS", ""));
    let personas_path = optional("CONTENTAI_PERSONAS_PATH").map(PathBuf::from);
    let heuristics_path = optional("CONTENTAI_HEURISTICS_PATH").map(PathBuf::from);

    let request_timeout_secs = parse_u64("CONTENTAI_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CONTENTAI_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("CONTENTAI_USER_AGENT", "contentai/0.1 (content-research)");
    let video_page_size =
        parse_u32("CONTENTAI_VIDEO_PAGE_SIZE", "10")?.clamp(1, MAX_VIDEO_PAGE_SIZE);

    let youtube_api_key = optional("YOUTUBE_API_KEY");
    let serp_api_key = optional("SERP_API_KEY");
    let reddit_client_id = optional("REDDIT_CLIENT_ID");
    let reddit_client_secret = optional("REDDIT_CLIENT_SECRET");
    let reddit_user_agent = or_default("REDDIT_USER_AGENT", "contentai/0.1");
    let twitter_bearer_token = optional("TWITTER_BEARER_TOKEN");

    let anthropic_api_key = optional("ANTHROPIC_API_KEY");
    let model = normalize_model(&or_default("MODEL", DEFAULT_MODEL));
    let generation_max_tokens = parse_u32("CONTENTAI_GENERATION_MAX_TOKENS", "4096")?;
    let generation_timeout_secs = parse_u64("CONTENTAI_GENERATION_TIMEOUT_SECS", "120")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        api_keys,
        personas_path,
        heuristics_path,
        request_timeout_secs,
        user_agent,
        video_page_size,
        youtube_api_key,
        serp_api_key,
        reddit_client_id,
        reddit_client_secret,
        reddit_user_agent,
        twitter_bearer_token,
        anthropic_api_key,
        model,
        generation_max_tokens,
        generation_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Split a comma-separated token list, dropping blanks and duplicates.
fn parse_api_keys(raw: &str) -> Vec<String> {
    let mut keys: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();
    keys.sort();
    keys.dedup();
    keys
}

/// Strip a provider routing prefix such as `anthropic/` from a model id.
fn normalize_model(raw: &str) -> String {
    raw.strip_prefix("anthropic/").unwrap_or(raw).to_string()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
