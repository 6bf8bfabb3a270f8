//! Injected dependencies for the dialog machine and materializer.
//!
//! All non-determinism (time, random identifiers) and the QR collaborator
//! sit behind these traits so the core stays deterministic under test.

use crate::error::PaymentCodeError;
use crate::pricing::Rupees;
use crate::types::{BookingId, TicketId};
use chrono::{DateTime, Utc};
use rand::Rng;

/// Clock trait - abstracts time operations for testability.
pub trait Clock: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of booking and ticket identifiers.
///
/// Identifiers are drawn at random without a uniqueness check against
/// existing records; the collision probability is accepted as negligible.
pub trait IdSource: Send + Sync {
    /// A fresh 6-digit booking id.
    fn booking_id(&self) -> BookingId;

    /// A fresh 7-digit ticket id.
    fn ticket_id(&self) -> TicketId;
}

/// Production id source drawing from the thread-local RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRngIdSource;

impl IdSource for ThreadRngIdSource {
    fn booking_id(&self) -> BookingId {
        BookingId::new(rand::thread_rng().gen_range(100_000..=999_999))
    }

    fn ticket_id(&self) -> TicketId {
        TicketId::new(rand::thread_rng().gen_range(1_000_000..=9_999_999))
    }
}

/// Payment QR collaborator.
///
/// Renders a scannable payment code for the given amount, embedding the
/// fixed merchant payment identifier, and returns it as a base64-encoded
/// PNG ready for the `payment` response.
pub trait PaymentCodeRenderer: Send + Sync {
    /// Render the payment code for `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentCodeError`] if encoding the QR or the image fails.
    fn render_payment_code(&self, amount: Rupees) -> Result<String, PaymentCodeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_rng_ids_stay_in_range() {
        let ids = ThreadRngIdSource;
        for _ in 0..100 {
            let booking = ids.booking_id().get();
            let ticket = ids.ticket_id().get();
            assert!((100_000..=999_999).contains(&booking));
            assert!((1_000_000..=9_999_999).contains(&ticket));
        }
    }
}
