//! Request plumbing shared by the provider clients.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::CollectError;

pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, CollectError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Parse a base URL, normalising it to end with exactly one slash so that
/// `Url::join` appends paths instead of replacing the last segment.
pub(crate) fn parse_base_url(provider: &'static str, raw: &str) -> Result<Url, CollectError> {
    let normalised = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|_| CollectError::InvalidBaseUrl {
        provider,
        url: raw.to_string(),
    })
}

pub(crate) fn endpoint(provider: &'static str, base: &Url, path: &str) -> Result<Url, CollectError> {
    base.join(path).map_err(|_| CollectError::InvalidBaseUrl {
        provider,
        url: format!("{base}{path}"),
    })
}

/// Send a request and decode the JSON body into `T`.
///
/// Status handling: 429 is `RateLimited`, 5xx is `Unavailable`, any other
/// non-2xx is `Api` carrying the provider's own error message when the body
/// has one. A 2xx body carrying an `error` field is also reported as `Api`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    provider: &'static str,
    context: &str,
    request: RequestBuilder,
) -> Result<T, CollectError> {
    let response = request
        .send()
        .await
        .map_err(|e| CollectError::from_transport(provider, e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| CollectError::from_transport(provider, e))?;

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(CollectError::RateLimited { provider });
    }
    if status.is_server_error() {
        return Err(CollectError::Unavailable {
            provider,
            status: status.as_u16(),
        });
    }

    let parsed: Result<serde_json::Value, _> = serde_json::from_str(&body);

    if !status.is_success() {
        let message = parsed
            .ok()
            .and_then(|v| api_error_message(&v))
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        return Err(CollectError::Api { provider, message });
    }

    let value = parsed.map_err(|e| CollectError::Malformed {
        provider,
        context: context.to_string(),
        source: e,
    })?;

    if let Some(message) = api_error_message(&value) {
        return Err(CollectError::Api { provider, message });
    }

    serde_json::from_value(value).map_err(|e| CollectError::Malformed {
        provider,
        context: context.to_string(),
        source: e,
    })
}

/// Extract an error message from the error envelopes the providers use:
/// `{"error": "text"}` or `{"error": {"message": "text"}}`.
pub(crate) fn api_error_message(body: &serde_json::Value) -> Option<String> {
    match body.get("error")? {
        serde_json::Value::String(message) => Some(message.clone()),
        serde_json::Value::Object(obj) => Some(
            obj.get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
        ),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Deserialize a count that may arrive as a number, a numeric string, or
/// nothing at all. Anything that is not a non-negative integer becomes 0.
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(0, count_from_value))
}

pub(crate) fn count_from_value(value: &serde_json::Value) -> u64 {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| {
                        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                        let whole = f.trunc() as u64;
                        whole
                    })
            })
            .unwrap_or(0),
        serde_json::Value::String(s) => s.trim().replace(',', "").parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}
