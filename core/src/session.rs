//! Per-conversation session state.

use crate::pricing::Rupees;
use crate::types::{BookingId, Visitor};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Dialog stage. Linear flow with two explicit cycles: declining payment
/// returns to the main menu, and a completed booking resets there too.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// First contact; any input advances.
    Greeting,
    /// Book-or-info branch point.
    MainMenu,
    /// Waiting for the ticket count.
    AskQuantity,
    /// Collecting `Name:Age` lines until the visitor list is full.
    CollectVisitor,
    /// Waiting for the contact address.
    AskEmail,
    /// Waiting for the visit date.
    AskVisitDate,
    /// Yes/no payment gate.
    ConfirmPayment,
    /// Waiting for the payment transaction reference.
    AwaitTransaction,
}

/// One in-progress conversation's accumulated state.
///
/// Created on the first message for an unseen session id, mutated in place
/// by every turn, and reset to the main menu after a successful booking.
/// One-shot conversations: there is no expiry or timeout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Current dialog stage.
    pub stage: Stage,
    /// Number of tickets being booked, 1-10 once set.
    pub quantity: Option<u32>,
    /// Ticket-holders collected so far; grows to `quantity`.
    pub visitors: Vec<Visitor>,
    /// Validated contact address.
    pub email: Option<String>,
    /// Requested visit date. Any parseable date is accepted.
    pub visit_date: Option<NaiveDate>,
    /// Sum of ticket prices, set once all visitors are entered.
    pub total_price: Option<Rupees>,
    /// Booking id, assigned on the payment-confirmation step.
    pub booking_id: Option<BookingId>,
}

impl Session {
    /// A fresh session at the greeting stage.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stage: Stage::Greeting,
            quantity: None,
            visitors: Vec::new(),
            email: None,
            visit_date: None,
            total_price: None,
            booking_id: None,
        }
    }

    /// Clear all accumulated state after a completed booking, leaving the
    /// session at the main menu for the next interaction.
    pub fn reset_after_booking(&mut self) {
        *self = Self {
            stage: Stage::MainMenu,
            ..Self::new()
        };
    }

    /// Index of the visitor currently being collected, 1-based.
    #[must_use]
    pub fn current_visitor(&self) -> usize {
        self.visitors.len() + 1
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_everything_but_lands_on_main_menu() {
        let mut session = Session::new();
        session.stage = Stage::AwaitTransaction;
        session.quantity = Some(2);
        session.visitors.push(Visitor::new("Alice", 30));
        session.email = Some("alice@example.com".to_string());
        session.visit_date = NaiveDate::from_ymd_opt(2025, 6, 1);
        session.total_price = Some(Rupees::new(150));
        session.booking_id = Some(BookingId::new(123_456));

        session.reset_after_booking();

        let expected = Session {
            stage: Stage::MainMenu,
            ..Session::new()
        };
        assert_eq!(session, expected);
    }

    #[test]
    fn visitor_index_is_one_based() {
        let mut session = Session::new();
        assert_eq!(session.current_visitor(), 1);
        session.visitors.push(Visitor::new("Alice", 30));
        assert_eq!(session.current_visitor(), 2);
    }
}
