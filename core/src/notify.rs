//! Email collaborator contract and the confirmation template.

use crate::error::NotifyError;
use crate::types::{Booking, MuseumInfo};
use async_trait::async_trait;

/// One outbound email.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
    /// Optional PNG embedded inline under the `museum_logo` content id.
    pub inline_png: Option<Vec<u8>>,
}

/// Email delivery collaborator.
///
/// Failures from implementations are logged by the caller and never
/// surfaced to the user; a booking stands regardless of whether its
/// confirmation email went out.
#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    /// Deliver `message`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if the message could not be built or sent.
    async fn send(&self, message: EmailMessage) -> Result<(), NotifyError>;
}

/// Subject line for a booking confirmation.
#[must_use]
pub fn confirmation_subject(museum: &MuseumInfo) -> String {
    format!("{} - Booking Confirmation", museum.name)
}

/// Render the confirmation email body for a saved booking.
///
/// `with_logo` controls whether the header references the inline
/// `museum_logo` image; pass `false` when no logo is attached.
#[must_use]
pub fn confirmation_html(booking: &Booking, museum: &MuseumInfo, with_logo: bool) -> String {
    let name = booking
        .tickets
        .first()
        .map_or("Visitor", |ticket| ticket.name.as_str());

    let visitors_list: String = booking
        .tickets
        .iter()
        .map(|ticket| format!("<li>{} - {}</li>", ticket.name, ticket.category.short_label()))
        .collect();

    let logo = if with_logo {
        r#"<img src="cid:museum_logo" alt="Museum Logo" class="logo">"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Booking Confirmation</title>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
        .container {{ width: 100%; max-width: 600px; margin: 0 auto; padding: 20px; }}
        .header {{ text-align: center; margin-bottom: 20px; }}
        .logo {{ max-width: 150px; }}
        h1 {{ color: #0056b3; }}
        .booking-details {{ background-color: #f8f9fa; padding: 15px; border-radius: 5px; }}
        .footer {{ margin-top: 20px; text-align: center; font-size: 0.9em; color: #6c757d; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            {logo}
            <h1>Booking Confirmation</h1>
        </div>
        <p>Dear {name},</p>
        <p>Thank you for booking with {museum_name}. Your reservation has been confirmed.</p>
        <div class="booking-details">
            <p><strong>Booking ID:</strong> {booking_id}</p>
            <p><strong>Visit Date:</strong> {visit_date}</p>
            <p><strong>Visitors:</strong></p>
            <ul>
                {visitors_list}
            </ul>
            <p><strong>Total Price:</strong> {total_price}</p>
        </div>
        <p>We look forward to welcoming you to our museum. If you have any questions, please don't hesitate to contact us.</p>
        <p>Best regards,<br>The {museum_name} Team</p>
        <div class="footer">
            <p>{museum_name} | {museum_address} | {museum_phone}</p>
        </div>
    </div>
</body>
</html>
"#,
        museum_name = museum.name,
        booking_id = booking.booking_id,
        visit_date = booking.visit_date.format("%B %d, %Y"),
        total_price = booking.total_price,
        museum_address = museum.address,
        museum_phone = museum.phone,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pricing::Rupees;
    use crate::types::{BookingId, Ticket, TicketId};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sample_booking() -> Booking {
        Booking {
            booking_id: BookingId::new(654_321),
            transaction_id: "TXN123".to_string(),
            email: "alice@example.com".to_string(),
            visit_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            booking_date: Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap(),
            total_price: Rupees::new(150),
            tickets: vec![
                Ticket {
                    ticket_id: TicketId::new(1_000_001),
                    name: "Alice".to_string(),
                    age: 30,
                    category: crate::pricing::classify(30),
                    price: Rupees::new(100),
                },
                Ticket {
                    ticket_id: TicketId::new(1_000_002),
                    name: "Bob".to_string(),
                    age: 8,
                    category: crate::pricing::classify(8),
                    price: Rupees::new(50),
                },
            ],
        }
    }

    #[test]
    fn template_includes_booking_details() {
        let html = confirmation_html(&sample_booking(), &MuseumInfo::default(), true);
        assert!(html.contains("Dear Alice,"));
        assert!(html.contains("654321"));
        assert!(html.contains("June 01, 2025"));
        assert!(html.contains("<li>Alice - Adult</li>"));
        assert!(html.contains("<li>Bob - Child</li>"));
        assert!(html.contains("₹150"));
        assert!(html.contains("cid:museum_logo"));
    }

    #[test]
    fn logo_reference_is_dropped_when_not_attached() {
        let html = confirmation_html(&sample_booking(), &MuseumInfo::default(), false);
        assert!(!html.contains("cid:museum_logo"));
    }

    #[test]
    fn subject_carries_museum_name() {
        assert_eq!(
            confirmation_subject(&MuseumInfo::default()),
            "City Art Museum - Booking Confirmation"
        );
    }
}
