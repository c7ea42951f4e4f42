//! Axum route handlers for the generation API.

use axum::{body::Bytes, extract::State, Json};
use serde_json::{json, Value};

use crate::interviews::generate::{generate_interview, GenerateError};
use crate::state::AppState;

/// GET /api/vapi/generate
pub async fn handle_generate_info() -> Json<Value> {
    Json(json!({ "success": true, "data": "THANK YOU" }))
}

/// POST /api/vapi/generate
///
/// Accepts a flat field set or a voice-agent tool-call envelope. The body is
/// taken as raw bytes so malformed JSON is reported in the pipeline's own
/// error envelope instead of axum's rejection.
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, GenerateError> {
    tracing::info!("Interview generation request received ({} bytes)", body.len());

    let interview =
        generate_interview(state.llm.as_ref(), state.interviews.as_ref(), &body).await?;

    Ok(Json(json!({ "success": true, "data": interview })))
}
