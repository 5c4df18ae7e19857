mod agents;
mod analytics;
mod collect;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use contentai_agents::{AgentError, Studio};
use contentai_core::{AppConfig, CredentialStatus, Platform};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::{
    enforce_rate_limit, request_id, require_bearer_auth, AuthState, RateLimitState, RequestId,
};

#[derive(Clone)]
pub struct AppState {
    pub studio: Studio,
    pub config: Arc<AppConfig>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    /// Provider errors behind a `snapshot_unusable` response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    environment: String,
    model: String,
    credentials: Vec<CredentialStatus>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                details: Vec::new(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.error.details = details;
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "snapshot_unusable" => StatusCode::UNPROCESSABLE_ENTITY,
            "generation_auth_failed" => StatusCode::SERVICE_UNAVAILABLE,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Map a crew failure to its API error. Generic failures carry no upstream
/// detail; the full error is logged here.
pub(super) fn map_agent_error(request_id: String, error: AgentError) -> ApiError {
    let message = error.public_message();
    match error {
        AgentError::SnapshotUnusable { errors } => {
            tracing::warn!(errors = errors.len(), "no real data collected");
            ApiError::new(request_id, "snapshot_unusable", message).with_details(errors)
        }
        AgentError::GenerationAuth(ref failure) => {
            tracing::error!(step = %failure.failed_step, error = %failure.error, "generation credentials rejected");
            ApiError::new(request_id, "generation_auth_failed", message)
        }
        AgentError::InvalidInput(_) => ApiError::new(request_id, "validation_error", message),
        other => {
            tracing::error!(error = %other, "crew failed");
            ApiError::new(request_id, "internal_error", message)
        }
    }
}

pub(super) fn require_text(request_id: &str, field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::new(
            request_id,
            "validation_error",
            format!("'{field}' must not be empty"),
        ));
    }
    Ok(())
}

/// Platform from an optional request label; unknown labels become YouTube.
pub(super) fn platform_or_default(label: Option<&str>) -> Platform {
    label.map_or(Platform::YouTube, Platform::resolve)
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState, rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/collect", post(collect::collect))
        .route("/api/v1/agents/topics", post(agents::find_topics))
        .route("/api/v1/agents/research", post(agents::research))
        .route("/api/v1/agents/script", post(agents::write_script))
        .route("/api/v1/agents/full", post(agents::full_content))
        .route("/api/v1/agents/smart-script", post(agents::smart_script))
        .route("/api/v1/analytics/trends", get(analytics::trends))
        .route("/api/v1/analytics/predictions", get(analytics::predictions))
        .route("/api/v1/analytics/competitors", post(analytics::competitors))
        .route("/api/v1/analytics/seo", post(analytics::seo))
        .route("/api/v1/analytics/engagement", post(analytics::engagement))
        .route(
            "/api/v1/analytics/posting-time",
            post(analytics::posting_time),
        )
        .route("/api/v1/analytics/hashtags", post(analytics::hashtags))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    auth,
                    require_bearer_auth,
                )),
        )
}

pub fn build_app(state: AppState, auth: AuthState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

/// Always 200; `status` is `degraded` when a required credential is missing.
async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<HealthData>> {
    let status = if state.config.is_fully_configured() {
        "ok"
    } else {
        "degraded"
    };

    Json(ApiResponse {
        data: HealthData {
            status,
            environment: state.config.env.to_string(),
            model: state.config.model.clone(),
            credentials: state.config.credential_status(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(60, Duration::from_secs(60))
}
