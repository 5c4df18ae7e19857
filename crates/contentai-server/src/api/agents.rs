//! Crew endpoints under `/api/v1/agents`.

use axum::{extract::State, Extension, Json};
use contentai_agents::{CrewOutput, SmartScriptOutput};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{
    map_agent_error, platform_or_default, require_text, ApiError, ApiResponse, AppState,
    ResponseMeta,
};

#[derive(Debug, Deserialize)]
pub(super) struct TopicsRequest {
    pub niche: String,
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TopicRequest {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ScriptRequest {
    pub topic: String,
    pub platform: Option<String>,
    pub research_context: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FullContentRequest {
    pub niche: String,
    pub topic: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SmartScriptRequest {
    pub topic: String,
    pub platform: Option<String>,
}

type CrewResponse = Result<Json<ApiResponse<CrewOutput>>, ApiError>;

fn respond(req_id: RequestId, output: CrewOutput) -> Json<ApiResponse<CrewOutput>> {
    Json(ApiResponse {
        data: output,
        meta: ResponseMeta::new(req_id.0),
    })
}

/// POST /api/v1/agents/topics
pub(super) async fn find_topics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<TopicsRequest>,
) -> CrewResponse {
    require_text(&req_id.0, "niche", &body.niche)?;
    let output = state
        .studio
        .find_topics(&body.niche, body.topic.as_deref())
        .await
        .map_err(|e| map_agent_error(req_id.0.clone(), e))?;
    Ok(respond(req_id, output))
}

/// POST /api/v1/agents/research
pub(super) async fn research(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<TopicRequest>,
) -> CrewResponse {
    require_text(&req_id.0, "topic", &body.topic)?;
    let output = state
        .studio
        .research(&body.topic)
        .await
        .map_err(|e| map_agent_error(req_id.0.clone(), e))?;
    Ok(respond(req_id, output))
}

/// POST /api/v1/agents/script
pub(super) async fn write_script(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ScriptRequest>,
) -> CrewResponse {
    require_text(&req_id.0, "topic", &body.topic)?;
    let output = state
        .studio
        .write_script(
            &body.topic,
            platform_or_default(body.platform.as_deref()),
            body.research_context.as_deref(),
        )
        .await
        .map_err(|e| map_agent_error(req_id.0.clone(), e))?;
    Ok(respond(req_id, output))
}

/// POST /api/v1/agents/full
pub(super) async fn full_content(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<FullContentRequest>,
) -> CrewResponse {
    require_text(&req_id.0, "niche", &body.niche)?;
    let output = state
        .studio
        .full_content(
            &body.niche,
            body.topic.as_deref(),
            platform_or_default(body.platform.as_deref()),
        )
        .await
        .map_err(|e| map_agent_error(req_id.0.clone(), e))?;
    Ok(respond(req_id, output))
}

/// POST /api/v1/agents/smart-script
///
/// 422 `snapshot_unusable` when no provider returned data; generation is
/// never attempted in that case.
pub(super) async fn smart_script(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SmartScriptRequest>,
) -> Result<Json<ApiResponse<SmartScriptOutput>>, ApiError> {
    require_text(&req_id.0, "topic", &body.topic)?;
    let output = state
        .studio
        .smart_script(&body.topic, platform_or_default(body.platform.as_deref()))
        .await
        .map_err(|e| map_agent_error(req_id.0.clone(), e))?;
    Ok(Json(ApiResponse {
        data: output,
        meta: ResponseMeta::new(req_id.0),
    }))
}
