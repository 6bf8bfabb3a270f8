//! The chat endpoint.

use crate::chat::ChatOutcome;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use musebook_core::response::ChatResponse;
use serde::Deserialize;
use tracing::info;

/// One inbound chat message.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Free-text user input.
    pub message: String,
    /// Client-chosen conversation identifier.
    pub session_id: String,
}

/// Process one chat turn.
///
/// Always answers with a structured [`ChatResponse`]; a failed booking
/// write keeps the response shape but signals the fault with a 500 status,
/// leaving the conversation resumable.
///
/// # Endpoint
///
/// ```text
/// POST /chat
/// {"message": "book tickets", "session_id": "abc"}
/// ```
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> (StatusCode, Json<ChatResponse>) {
    info!(session_id = %request.session_id, "received chat message");
    match state
        .chat
        .process(&request.session_id, &request.message)
        .await
    {
        ChatOutcome::Reply(response) => (StatusCode::OK, Json(response)),
        ChatOutcome::StorageFailure(response) => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response))
        }
    }
}
