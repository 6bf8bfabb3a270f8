//! Structured, UI-renderable chat responses.
//!
//! Every dialog turn produces exactly one of these. The wire shape is
//! `{"type": ..., "content": {...}}` with per-type content fields.

use crate::types::BookingId;
use serde::{Deserialize, Serialize};

/// One structured response, serialized as a tagged `type`/`content` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum ChatResponse {
    /// Plain text message.
    Text {
        /// Message body.
        message: String,
    },

    /// Message with quick-reply options.
    Options {
        /// Optional panel title.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Message body.
        message: String,
        /// Quick-reply choices.
        options: Vec<String>,
    },

    /// Museum information panel.
    Info {
        /// Panel title.
        title: String,
        /// Lead-in message.
        message: String,
        /// Detail lines.
        details: Vec<String>,
        /// Follow-up question.
        question: String,
        /// Quick-reply choices for the question.
        options: Vec<String>,
    },

    /// Payment panel with a scannable QR code.
    Payment {
        /// Panel title.
        title: String,
        /// Message body.
        message: String,
        /// Base64-encoded PNG of the payment QR.
        qr_code: String,
        /// Kind of input the UI should show next.
        input_type: String,
        /// Prompt above that input.
        input_message: String,
    },

    /// Booking confirmation panel.
    Confirmation {
        /// Panel title.
        title: String,
        /// Message body.
        message: String,
    },
}

impl ChatResponse {
    /// A plain text response.
    #[must_use]
    pub fn text(message: impl Into<String>) -> Self {
        Self::Text {
            message: message.into(),
        }
    }
}

/// The confirmation shown after a booking is saved and the email dispatched.
#[must_use]
pub fn confirmation(booking_id: BookingId, email: &str) -> ChatResponse {
    ChatResponse::Confirmation {
        title: "Booking Confirmed".to_string(),
        message: format!(
            "Thank you for your payment! Your booking is confirmed. Your booking ID is \
             {booking_id}. A confirmation email has been sent to {email}."
        ),
    }
}

/// Generic retry/support message shown when the booking write fails. The
/// session is deliberately left untouched alongside this response.
#[must_use]
pub fn storage_apology() -> ChatResponse {
    ChatResponse::text(
        "An error occurred while processing your booking. Please try again or contact support.",
    )
}

/// Generic fallback for any unexpected fault while computing a response.
#[must_use]
pub fn fallback() -> ChatResponse {
    ChatResponse::text("Sorry, I encountered an error.")
}
