//! Ticket pricing and age classification.
//!
//! The category of a ticket is derived from the visitor's age at the moment
//! the visitor is entered into the conversation and is never re-derived.
//! Prices, however, are looked up from this table again when the booking is
//! saved, so a price change mid-conversation can make the saved price differ
//! from the quoted one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Age below which a visitor gets a child ticket.
pub const CHILD_AGE_LIMIT: u32 = 12;

/// Age from which a visitor gets a senior ticket.
pub const SENIOR_AGE_START: u32 = 60;

/// Ticket category, derived from visitor age.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketCategory {
    /// Under 12.
    Child,
    /// 12 to 59 inclusive.
    Adult,
    /// 60 and above.
    Senior,
}

impl TicketCategory {
    /// Price for one ticket of this category, in rupees.
    #[must_use]
    pub const fn price(self) -> Rupees {
        match self {
            Self::Child => Rupees::new(50),
            Self::Adult => Rupees::new(100),
            Self::Senior => Rupees::new(70),
        }
    }

    /// Human-readable label used on tickets and in emails.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Child => "Child (under 12)",
            Self::Adult => "Adult (12-60)",
            Self::Senior => "Senior Citizen (60+)",
        }
    }

    /// Short display name, the label without the age range.
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Child => "Child",
            Self::Adult => "Adult",
            Self::Senior => "Senior Citizen",
        }
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify an age into a ticket category.
///
/// Total over all ages: `[0, 12)` → Child, `[12, 60)` → Adult,
/// `[60, ∞)` → Senior.
#[must_use]
pub const fn classify(age: u32) -> TicketCategory {
    if age < CHILD_AGE_LIMIT {
        TicketCategory::Child
    } else if age < SENIOR_AGE_START {
        TicketCategory::Adult
    } else {
        TicketCategory::Senior
    }
}

/// An amount of money in whole rupees.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Rupees(u32);

impl Rupees {
    /// Create an amount from whole rupees.
    #[must_use]
    pub const fn new(amount: u32) -> Self {
        Self(amount)
    }

    /// The amount in whole rupees.
    #[must_use]
    pub const fn amount(self) -> u32 {
        self.0
    }
}

impl Add for Rupees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(0), Add::add)
    }
}

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn classifies_boundary_ages() {
        assert_eq!(classify(0), TicketCategory::Child);
        assert_eq!(classify(11), TicketCategory::Child);
        assert_eq!(classify(12), TicketCategory::Adult);
        assert_eq!(classify(59), TicketCategory::Adult);
        assert_eq!(classify(60), TicketCategory::Senior);
        assert_eq!(classify(95), TicketCategory::Senior);
    }

    #[test]
    fn price_table() {
        assert_eq!(TicketCategory::Child.price(), Rupees::new(50));
        assert_eq!(TicketCategory::Adult.price(), Rupees::new(100));
        assert_eq!(TicketCategory::Senior.price(), Rupees::new(70));
    }

    #[test]
    fn labels_match_ticket_wording() {
        assert_eq!(TicketCategory::Child.label(), "Child (under 12)");
        assert_eq!(TicketCategory::Adult.label(), "Adult (12-60)");
        assert_eq!(TicketCategory::Senior.label(), "Senior Citizen (60+)");
        assert_eq!(TicketCategory::Senior.short_label(), "Senior Citizen");
    }

    #[test]
    fn rupees_sum_and_display() {
        let total: Rupees = [Rupees::new(100), Rupees::new(50)].into_iter().sum();
        assert_eq!(total, Rupees::new(150));
        assert_eq!(total.to_string(), "₹150");
    }

    proptest! {
        // Classification is total with no gaps or overlaps: every age lands
        // in exactly the interval the price table was written for.
        #[test]
        fn classification_is_total(age in 0u32..=200) {
            let category = classify(age);
            let expected = if age < 12 {
                TicketCategory::Child
            } else if age < 60 {
                TicketCategory::Adult
            } else {
                TicketCategory::Senior
            };
            prop_assert_eq!(category, expected);
        }
    }
}
