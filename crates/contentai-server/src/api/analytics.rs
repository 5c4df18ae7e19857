//! Analysis crews and heuristic endpoints under `/api/v1/analytics`.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use contentai_agents::{CrewOutput, EngagementEstimate, EngagementInput, HashtagSet, PostingPlan};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{
    map_agent_error, platform_or_default, require_text, ApiError, ApiResponse, AppState,
    ResponseMeta,
};

const MAX_KEYWORDS: usize = 5;

#[derive(Debug, Deserialize)]
pub(super) struct KeywordsQuery {
    /// Comma-separated.
    pub keywords: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CompetitorsRequest {
    pub channels: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SeoRequest {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct EngagementRequest {
    pub topic: String,
    pub platform: Option<String>,
    #[serde(default)]
    pub niche: String,
    pub has_hook: Option<bool>,
    pub has_visuals: Option<bool>,
    pub duration_secs: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PostingTimeRequest {
    pub platform: Option<String>,
    #[serde(default)]
    pub niche: String,
    pub audience: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct HashtagsRequest {
    pub topic: String,
    pub platform: Option<String>,
    #[serde(default)]
    pub niche: String,
}

fn ok<T: serde::Serialize>(req_id: RequestId, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

fn parse_keywords(req_id: &str, raw: Option<&str>) -> Result<Vec<String>, ApiError> {
    let keywords: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    if keywords.is_empty() {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            "'keywords' must list at least one keyword",
        ));
    }
    if keywords.len() > MAX_KEYWORDS {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            format!("at most {MAX_KEYWORDS} keywords are supported"),
        ));
    }
    Ok(keywords)
}

/// GET /api/v1/analytics/trends?keywords=a,b
pub(super) async fn trends(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<KeywordsQuery>,
) -> Result<Json<ApiResponse<CrewOutput>>, ApiError> {
    let keywords = parse_keywords(&req_id.0, query.keywords.as_deref())?;
    let output = state
        .studio
        .analyze_trends(&keywords)
        .await
        .map_err(|e| map_agent_error(req_id.0.clone(), e))?;
    Ok(ok(req_id, output))
}

/// GET /api/v1/analytics/predictions?keywords=a,b
pub(super) async fn predictions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<KeywordsQuery>,
) -> Result<Json<ApiResponse<CrewOutput>>, ApiError> {
    let keywords = parse_keywords(&req_id.0, query.keywords.as_deref())?;
    let output = state
        .studio
        .predict_trends(&keywords)
        .await
        .map_err(|e| map_agent_error(req_id.0.clone(), e))?;
    Ok(ok(req_id, output))
}

/// POST /api/v1/analytics/competitors
pub(super) async fn competitors(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CompetitorsRequest>,
) -> Result<Json<ApiResponse<CrewOutput>>, ApiError> {
    if body.channels.iter().all(|c| c.trim().is_empty()) {
        return Err(ApiError::new(
            &req_id.0,
            "validation_error",
            "'channels' must list at least one channel",
        ));
    }
    let output = state
        .studio
        .analyze_competitors(&body.channels)
        .await
        .map_err(|e| map_agent_error(req_id.0.clone(), e))?;
    Ok(ok(req_id, output))
}

/// POST /api/v1/analytics/seo
pub(super) async fn seo(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SeoRequest>,
) -> Result<Json<ApiResponse<CrewOutput>>, ApiError> {
    require_text(&req_id.0, "topic", &body.topic)?;
    let output = state
        .studio
        .seo(&body.topic)
        .await
        .map_err(|e| map_agent_error(req_id.0.clone(), e))?;
    Ok(ok(req_id, output))
}

/// POST /api/v1/analytics/engagement
#[allow(clippy::unused_async)]
pub(super) async fn engagement(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<EngagementRequest>,
) -> Result<Json<ApiResponse<EngagementEstimate>>, ApiError> {
    require_text(&req_id.0, "topic", &body.topic)?;

    let mut input = EngagementInput::new(body.topic, platform_or_default(body.platform.as_deref()));
    input.niche = body.niche;
    input.has_hook = body.has_hook.unwrap_or(true);
    input.has_visuals = body.has_visuals.unwrap_or(true);
    input.duration_secs = body.duration_secs;

    Ok(ok(req_id, state.studio.engagement(&input)))
}

/// POST /api/v1/analytics/posting-time
#[allow(clippy::unused_async)]
pub(super) async fn posting_time(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<PostingTimeRequest>,
) -> Json<ApiResponse<PostingPlan>> {
    let plan = state.studio.posting_time(
        platform_or_default(body.platform.as_deref()),
        &body.niche,
        body.audience.as_deref().unwrap_or("US"),
    );
    ok(req_id, plan)
}

/// POST /api/v1/analytics/hashtags
pub(super) async fn hashtags(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<HashtagsRequest>,
) -> Result<Json<ApiResponse<HashtagSet>>, ApiError> {
    require_text(&req_id.0, "topic", &body.topic)?;
    let set = state
        .studio
        .hashtags(
            body.topic.trim(),
            &body.niche,
            platform_or_default(body.platform.as_deref()),
        )
        .await;
    Ok(ok(req_id, set))
}
