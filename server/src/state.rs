//! Application state shared across HTTP handlers.

use crate::chat::ChatService;
use musebook_postgres::PostgresBookingStore;
use std::sync::Arc;

/// Shared state, cloned (cheaply via `Arc`) for each request.
#[derive(Clone)]
pub struct AppState {
    /// Chat turn processor.
    pub chat: Arc<ChatService>,

    /// Booking store handle, used by the readiness probe. `None` when the
    /// store is replaced by a test double; readiness then reports ready.
    pub db: Option<PostgresBookingStore>,
}

impl AppState {
    /// Creates a new `AppState`.
    #[must_use]
    pub const fn new(chat: Arc<ChatService>, db: Option<PostgresBookingStore>) -> Self {
        Self { chat, db }
    }
}
