//! Follow-up handler
//!
//! Continues an existing chat session. There is no grounding fallback
//! here: whatever mode the session was created with is the mode it keeps.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use scout_core::model::Source;
use scout_core::ScoutError;

use crate::error::ApiError;
use crate::state::AppState;

use super::{non_empty, render_reply};

/// Follow-up request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpRequest {
    pub session_id: Option<String>,
    pub query: Option<String>,
}

/// Follow-up response body; the caller already knows the session id.
#[derive(Debug, Serialize)]
pub struct FollowUpResponse {
    pub summary: String,
    pub sources: Vec<Source>,
}

/// Handle `POST /api/follow-up`
pub async fn follow_up_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FollowUpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.increment_requests();

    let (Some(session_id), Some(query)) = (non_empty(req.session_id), non_empty(req.query)) else {
        return Err(
            ScoutError::Validation("Both sessionId and query are required".to_string()).into(),
        );
    };

    let Some(session) = state.sessions.get(&session_id).await else {
        return Err(ScoutError::NotFound("Chat session not found".to_string()).into());
    };

    // Serializes concurrent follow-ups on the same session.
    let mut chat = session.lock().await;
    let reply = state.model.send_message(&mut chat, &query).await?;

    let (summary, sources) = render_reply(&reply);

    Ok((StatusCode::OK, Json(FollowUpResponse { summary, sources })))
}
