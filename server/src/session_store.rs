//! Concurrency-safe session store.
//!
//! Maps session ids to live sessions with create-on-first-use semantics.
//! Distinct sessions can be processed in parallel; each session carries its
//! own async mutex, which the chat service holds for the whole turn so two
//! concurrent requests for one session id cannot interleave.

use musebook_core::session::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Shared map from session id to session, injected into the chat service.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Arc<Mutex<Session>>>>>,
}

impl SessionStore {
    /// Creates an empty `SessionStore`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the session for `session_id`, creating a fresh one at the
    /// greeting stage on first use.
    ///
    /// Sessions live until the process exits; conversations are one-shot
    /// and there is no expiry mechanism.
    pub async fn get_or_create(&self, session_id: &str) -> Arc<Mutex<Session>> {
        if let Some(session) = self.inner.read().await.get(session_id) {
            return Arc::clone(session);
        }
        let mut sessions = self.inner.write().await;
        Arc::clone(
            sessions
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(Session::new()))),
        )
    }
}
