//! Booking materialization.
//!
//! Converts a completed conversation's [`BookingDraft`] into a persisted
//! [`Booking`] and triggers the confirmation email. The storage write is
//! atomic and its failure propagates; email dispatch is fire-and-forget
//! from the caller's perspective.

use crate::environment::{Clock, IdSource};
use crate::error::StorageError;
use crate::notify::{confirmation_html, confirmation_subject, EmailDispatcher, EmailMessage};
use crate::storage::BookingStore;
use crate::types::{Booking, BookingDraft, MuseumInfo, Ticket};
use std::sync::Arc;
use tracing::{error, info};

/// Converts completed sessions into persisted bookings.
pub struct BookingMaterializer {
    store: Arc<dyn BookingStore>,
    mailer: Arc<dyn EmailDispatcher>,
    ids: Arc<dyn IdSource>,
    clock: Arc<dyn Clock>,
    museum: MuseumInfo,
    logo: Option<Vec<u8>>,
}

impl BookingMaterializer {
    /// Creates a new `BookingMaterializer`.
    #[must_use]
    pub fn new(
        store: Arc<dyn BookingStore>,
        mailer: Arc<dyn EmailDispatcher>,
        ids: Arc<dyn IdSource>,
        clock: Arc<dyn Clock>,
        museum: MuseumInfo,
    ) -> Self {
        Self {
            store,
            mailer,
            ids,
            clock,
            museum,
            logo: None,
        }
    }

    /// Attach a PNG logo to embed inline in confirmation emails.
    #[must_use]
    pub fn with_logo(mut self, logo: Option<Vec<u8>>) -> Self {
        self.logo = logo;
        self
    }

    /// Materialize a completed conversation.
    ///
    /// Draws one fresh ticket id per visitor, persists the booking and all
    /// tickets as a single atomic unit, then dispatches the confirmation
    /// email. Email failure is logged and swallowed; the booking stands.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the transactional write could not
    /// complete. Nothing was persisted in that case, and the caller should
    /// leave the conversation state untouched so the turn can be retried.
    pub async fn materialize(&self, draft: BookingDraft) -> Result<Booking, StorageError> {
        // Ticket ids are drawn per attempt; a retried turn keeps its booking
        // id (still in the session) but gets fresh ticket ids.
        let tickets: Vec<Ticket> = draft
            .visitors
            .iter()
            .map(|visitor| Ticket {
                ticket_id: self.ids.ticket_id(),
                name: visitor.name.clone(),
                age: visitor.age,
                category: visitor.category,
                // Price is looked up at save time, not frozen at entry.
                price: visitor.category.price(),
            })
            .collect();

        let booking = Booking {
            booking_id: draft.booking_id,
            transaction_id: draft.transaction_id,
            email: draft.email,
            visit_date: draft.visit_date,
            booking_date: self.clock.now(),
            total_price: draft.total_price,
            tickets,
        };

        self.store.save(&booking).await?;
        info!(
            booking_id = %booking.booking_id,
            tickets = booking.quantity(),
            "booking saved"
        );

        let message = EmailMessage {
            to: booking.email.clone(),
            subject: confirmation_subject(&self.museum),
            html_body: confirmation_html(&booking, &self.museum, self.logo.is_some()),
            inline_png: self.logo.clone(),
        };
        if let Err(err) = self.mailer.send(message).await {
            error!(
                booking_id = %booking.booking_id,
                error = %err,
                "failed to send confirmation email"
            );
        }

        Ok(booking)
    }
}

