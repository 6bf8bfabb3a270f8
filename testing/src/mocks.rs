//! Mock implementations of the collaborator traits.
//!
//! Deterministic stand-ins for time, identifiers, the QR renderer, storage,
//! and email, so dialog and materializer behavior can be asserted without
//! I/O.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use musebook_core::environment::{Clock, IdSource, PaymentCodeRenderer};
use musebook_core::error::{NotifyError, PaymentCodeError, StorageError};
use musebook_core::notify::{EmailDispatcher, EmailMessage};
use musebook_core::pricing::Rupees;
use musebook_core::storage::BookingStore;
use musebook_core::types::{Booking, BookingId, TicketId};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

/// Fixed clock for deterministic tests. Always returns the same instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    #[allow(clippy::unwrap_used)] // Constant timestamp is always valid
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Predictable id source.
///
/// Booking ids are always `123456`; ticket ids count up from `1000001`.
#[derive(Debug, Default)]
pub struct ScriptedIds {
    next_ticket_offset: AtomicU32,
}

impl ScriptedIds {
    /// The booking id every `ScriptedIds` hands out.
    pub const BOOKING_ID: u32 = 123_456;
}

impl IdSource for ScriptedIds {
    fn booking_id(&self) -> BookingId {
        BookingId::new(Self::BOOKING_ID)
    }

    fn ticket_id(&self) -> TicketId {
        let offset = self.next_ticket_offset.fetch_add(1, Ordering::SeqCst);
        TicketId::new(1_000_001 + offset)
    }
}

/// Payment code renderer returning a fixed marker string, or failing on
/// demand.
#[derive(Debug, Default)]
pub struct StaticPaymentCode {
    fail: bool,
}

impl StaticPaymentCode {
    /// The marker every successful render returns.
    pub const CODE: &'static str = "QR-PNG-BASE64";

    /// A renderer that fails every render.
    #[must_use]
    pub const fn failing() -> Self {
        Self { fail: true }
    }
}

impl PaymentCodeRenderer for StaticPaymentCode {
    fn render_payment_code(&self, amount: Rupees) -> Result<String, PaymentCodeError> {
        if self.fail {
            return Err(PaymentCodeError(format!(
                "simulated failure rendering {amount}"
            )));
        }
        Ok(Self::CODE.to_string())
    }
}

/// In-memory booking store that records saves and can fail on demand.
#[derive(Debug, Default)]
pub struct MemoryBookingStore {
    saved: Mutex<Vec<Booking>>,
    fail_next: AtomicBool,
}

impl MemoryBookingStore {
    /// Make the next `save` fail with a database error, saving nothing.
    pub fn fail_next_save(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// All bookings saved so far.
    #[must_use]
    pub fn saved(&self) -> Vec<Booking> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn save(&self, booking: &Booking) -> Result<(), StorageError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(StorageError::Database(
                "simulated transaction failure".to_string(),
            ));
        }
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(booking.clone());
        Ok(())
    }
}

/// Email dispatcher that records messages and can fail on demand.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
    fail_next: AtomicBool,
}

impl RecordingMailer {
    /// Make the next `send` fail, recording nothing.
    pub fn fail_next_send(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// All messages sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl EmailDispatcher for RecordingMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), NotifyError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(NotifyError::Send("simulated smtp failure".to_string()));
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
        Ok(())
    }
}
