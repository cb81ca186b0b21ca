use crate::error::IronlogError;
use crate::server::router::IronlogState;
use crate::sync::SyncService;
use axum::{Json, body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use ironlog_schema::{SyncRequest, SyncResponse};

/// POST /api/sync
///
/// Body `{"days": n}` is optional; an empty body uses the configured window.
pub async fn run_sync(
    State(state): State<IronlogState>,
    body: Bytes,
) -> Result<impl IntoResponse, IronlogError> {
    let request: SyncRequest = if body.iter().all(u8::is_ascii_whitespace) {
        SyncRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| IronlogError::Validation(format!("invalid sync request: {e}")))?
    };

    let report = SyncService::run(&state.sync_cfg, &state.client, &state.db, request.days).await?;
    Ok(Json(SyncResponse {
        success: true,
        report,
    }))
}

/// GET /api/sync
pub async fn sync_status(
    State(state): State<IronlogState>,
) -> Result<impl IntoResponse, IronlogError> {
    Ok(Json(SyncService::status(&state.db).await?))
}

/// DELETE /api/sync
pub async fn disconnect(
    State(state): State<IronlogState>,
) -> Result<impl IntoResponse, IronlogError> {
    SyncService::disconnect(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}
