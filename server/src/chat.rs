//! Chat turn processing.
//!
//! `ChatService` sits between the HTTP handlers and the functional core:
//! it resolves the session, drives the dialog machine, and executes the
//! terminal materialization. Any fault while computing a response is
//! converted here into the generic fallback text; a chat turn never
//! surfaces an internal error shape to the transport.

use crate::session_store::SessionStore;
use musebook_core::dialog::{DialogEnvironment, DialogMachine, Turn};
use musebook_core::materializer::BookingMaterializer;
use musebook_core::response::{self, ChatResponse};
use tracing::{error, info};

/// Outcome of one chat turn, from the transport's point of view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatOutcome {
    /// Normal reply, served with 200.
    Reply(ChatResponse),

    /// The booking write failed. Served with 500; the session was left
    /// untouched so resubmitting the turn retries the materialization.
    StorageFailure(ChatResponse),
}

/// Drives dialog turns against the session store and materializer.
pub struct ChatService {
    machine: DialogMachine,
    env: DialogEnvironment,
    materializer: BookingMaterializer,
    sessions: SessionStore,
}

impl ChatService {
    /// Creates a new `ChatService` with an empty session store.
    #[must_use]
    pub fn new(env: DialogEnvironment, materializer: BookingMaterializer) -> Self {
        Self {
            machine: DialogMachine::new(),
            env,
            materializer,
            sessions: SessionStore::new(),
        }
    }

    /// Process one chat message for `session_id`.
    pub async fn process(&self, session_id: &str, message: &str) -> ChatOutcome {
        let handle = self.sessions.get_or_create(session_id).await;
        // Held across the whole turn, including the booking write: turns
        // for one session id are strictly serialized.
        let mut session = handle.lock().await;

        let turn = match self.machine.handle(&mut session, message, &self.env) {
            Ok(turn) => turn,
            Err(err) => {
                error!(%session_id, error = %err, "dialog turn failed");
                return ChatOutcome::Reply(response::fallback());
            }
        };

        match turn {
            Turn::Reply(reply) => ChatOutcome::Reply(reply),
            Turn::Finalize { draft } => match self.materializer.materialize(draft).await {
                Ok(booking) => {
                    info!(%session_id, booking_id = %booking.booking_id, "booking confirmed");
                    session.reset_after_booking();
                    ChatOutcome::Reply(response::confirmation(booking.booking_id, &booking.email))
                }
                Err(err) => {
                    // The session stays parked at the transaction step; a
                    // resubmitted turn re-materializes with the same booking
                    // id and fresh ticket ids.
                    error!(%session_id, error = %err, "booking materialization failed");
                    ChatOutcome::StorageFailure(response::storage_apology())
                }
            },
        }
    }
}
