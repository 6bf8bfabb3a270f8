//! Router configuration.

use crate::handlers::{chat, health};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the complete Axum router.
///
/// Routes:
/// - `POST /chat`: the single conversational endpoint
/// - `GET /health`: liveness, fixed OK
/// - `GET /ready`: readiness, pings the database
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat::chat))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
