// ABOUTME: API key issuance handler.
// ABOUTME: POST /api/key/generate is unauthenticated and returns a freshly persisted key.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::app_state::SharedState;
use crate::error::ApiError;

/// POST /api/key/generate - Issue a new API key.
pub async fn generate_key(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let api_key = state.storage.keys().issue()?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "status": "success", "api_key": api_key })),
    ))
}
