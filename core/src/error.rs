//! Error types for the booking core.
//!
//! Malformed user input is never an error here: the dialog machine recovers
//! from it locally with a re-prompt response. These types cover the faults
//! that the shell has to route: internal faults while computing a response,
//! failed transactional writes, and failed email dispatch.

use crate::session::Stage;
use thiserror::Error;

/// Payment QR rendering failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("payment code rendering failed: {0}")]
pub struct PaymentCodeError(pub String);

/// Internal fault while computing a dialog response.
///
/// The turn-processing boundary converts these into the generic fallback
/// text; they must never reach the transport layer as a crash.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// The payment QR collaborator failed.
    #[error(transparent)]
    PaymentCode(#[from] PaymentCodeError),

    /// A stage found a field missing that an earlier stage should have set.
    #[error("session is missing {field} at stage {stage:?}")]
    IncompleteSession {
        /// Stage that needed the field.
        stage: Stage,
        /// Name of the missing field.
        field: &'static str,
    },
}

/// The transactional booking write could not complete.
///
/// Reported to the user as a generic retry/support message; the session is
/// left untouched so the turn can be resubmitted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Database-level failure (connection, constraint, transaction).
    #[error("database error: {0}")]
    Database(String),
}

/// Confirmation email dispatch failed.
///
/// Logged only; never surfaced to the user and never rolls back a booking.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// An address could not be parsed into a mailbox.
    #[error("invalid email address: {0}")]
    Address(String),

    /// Building or sending the message failed.
    #[error("failed to send email: {0}")]
    Send(String),
}
