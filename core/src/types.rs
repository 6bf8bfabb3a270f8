//! Domain types for the booking flow.
//!
//! Identifier newtypes, the visitor value object, the draft handed from the
//! dialog machine to the materializer, and the persisted booking shape.

use crate::pricing::{classify, Rupees, TicketCategory};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a booking (6-digit).
///
/// Drawn randomly on the payment-confirmation step; collisions with existing
/// bookings are accepted as negligible rather than checked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(u32);

impl BookingId {
    /// Wrap a raw booking id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw numeric id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a single ticket (7-digit).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketId(u32);

impl TicketId {
    /// Wrap a raw ticket id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw numeric id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One ticket-holder: name, age, and the category derived from the age.
///
/// The category is fixed when the visitor is entered and never re-derived,
/// even if the classification rule were to change afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visitor {
    /// Visitor name, non-empty after trimming.
    pub name: String,
    /// Visitor age in years.
    pub age: u32,
    /// Ticket category derived from `age` at entry time.
    pub category: TicketCategory,
}

impl Visitor {
    /// Create a visitor, deriving the ticket category from the age.
    #[must_use]
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            category: classify(age),
        }
    }
}

/// Everything the dialog machine accumulated for one booking, handed to the
/// materializer once the transaction reference arrives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingDraft {
    /// Booking id generated on the payment-confirmation step.
    pub booking_id: BookingId,
    /// Free-form payment reference entered by the user. Unverified.
    pub transaction_id: String,
    /// Ticket-holders, one per ticket.
    pub visitors: Vec<Visitor>,
    /// Total quoted to the user when the visitor list completed.
    pub total_price: Rupees,
    /// Requested visit date.
    pub visit_date: NaiveDate,
    /// Contact address for the confirmation email.
    pub email: String,
}

/// One persisted ticket row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    /// Fresh 7-digit id for this ticket.
    pub ticket_id: TicketId,
    /// Holder name.
    pub name: String,
    /// Holder age.
    pub age: u32,
    /// Category fixed at entry time.
    pub category: TicketCategory,
    /// Price looked up from the price table at save time.
    pub price: Rupees,
}

/// The finalized, persisted record of a completed purchase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Booking {
    /// Booking id carried over from the conversation.
    pub booking_id: BookingId,
    /// Unverified payment reference.
    pub transaction_id: String,
    /// Contact address.
    pub email: String,
    /// Requested visit date.
    pub visit_date: NaiveDate,
    /// Creation timestamp.
    pub booking_date: DateTime<Utc>,
    /// Total quoted during the conversation.
    pub total_price: Rupees,
    /// One ticket per visitor. Always `quantity` entries.
    pub tickets: Vec<Ticket>,
}

impl Booking {
    /// Number of tickets in this booking.
    #[must_use]
    pub fn quantity(&self) -> usize {
        self.tickets.len()
    }
}

/// Static facts about the museum, shown in the info panel and the
/// confirmation email footer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuseumInfo {
    /// Museum name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Opening hours.
    pub hours: String,
    /// Contact phone number.
    pub phone: String,
}

impl Default for MuseumInfo {
    fn default() -> Self {
        Self {
            name: "City Art Museum".to_string(),
            address: "Sector-12, Moshi, Pune".to_string(),
            hours: "9:00 AM - 5:00 PM, Tuesday through Sunday (Closed on Mondays)".to_string(),
            phone: "7083850807".to_string(),
        }
    }
}
