use axum::{extract::State, Extension, Json};
use contentai_collect::CollectedSnapshot;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{platform_or_default, require_text, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct CollectRequest {
    pub topic: String,
    pub platform: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct CollectResponse {
    pub snapshot: CollectedSnapshot,
    /// The grounding text generation steps would receive.
    pub context: String,
}

/// POST /api/v1/collect
///
/// Returns 200 even when every provider failed; `snapshot.errors` says why.
pub(super) async fn collect(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CollectRequest>,
) -> Result<Json<ApiResponse<CollectResponse>>, ApiError> {
    require_text(&req_id.0, "topic", &body.topic)?;

    let snapshot = state
        .studio
        .collect(
            body.topic.trim(),
            platform_or_default(body.platform.as_deref()),
        )
        .await;
    let context = snapshot.to_context();

    Ok(Json(ApiResponse {
        data: CollectResponse { snapshot, context },
        meta: ResponseMeta::new(req_id.0),
    }))
}
