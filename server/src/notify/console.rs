//! Console email dispatcher for development.
//!
//! Used when no SMTP credentials are configured: logs the email instead of
//! sending it, so the booking flow stays exercisable locally.

use async_trait::async_trait;
use musebook_core::error::NotifyError;
use musebook_core::notify::{EmailDispatcher, EmailMessage};
use tracing::info;

/// Logs outbound emails instead of delivering them.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleEmailDispatcher;

impl ConsoleEmailDispatcher {
    /// Creates a new console dispatcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailDispatcher for ConsoleEmailDispatcher {
    async fn send(&self, message: EmailMessage) -> Result<(), NotifyError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            body_bytes = message.html_body.len(),
            has_logo = message.inline_png.is_some(),
            "email (development mode, not sent)"
        );
        Ok(())
    }
}
