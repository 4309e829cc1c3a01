//! Search handler
//!
//! Starts a new chat session. Grounding via Google Search is preferred;
//! if the grounded call fails (model or tool permissions), the query is
//! retried once on a fresh ungrounded session. The session that actually
//! answered is the one registered.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use scout_core::model::{GroundingMode, Source};
use scout_core::ScoutError;

use crate::error::ApiError;
use crate::state::AppState;

use super::{non_empty, render_reply};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Search response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Identifier for follow-up requests
    pub session_id: String,
    /// HTML-formatted answer
    pub summary: String,
    /// Cited web sources, empty when grounding was unavailable
    pub sources: Vec<Source>,
}

/// Handle `GET /api/search?q=`
pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    state.increment_requests();

    let Some(query) = non_empty(params.q) else {
        return Err(ScoutError::Validation("Query parameter 'q' is required".to_string()).into());
    };

    let mut session = state.model.start_chat(GroundingMode::Grounded);
    let reply = match state.model.send_message(&mut session, &query).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(error = %err, "search with google_search tool failed; retrying without tools");
            session = state.model.start_chat(GroundingMode::Ungrounded);
            state.model.send_message(&mut session, &query).await?
        }
    };

    let (summary, sources) = render_reply(&reply);
    let session_id = state.sessions.create(session).await;

    Ok((
        StatusCode::OK,
        Json(SearchResponse {
            session_id,
            summary,
            sources,
        }),
    ))
}
