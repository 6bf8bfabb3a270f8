//! Booking materializer tests.
//!
//! Relocated from an inline `#[cfg(test)] mod tests` in
//! `core/src/materializer.rs` for the same reason as `dialog_tests.rs`: the
//! `musebook-testing` helpers depend on `musebook-core`, so inline tests built
//! `musebook-core` twice and hit "multiple different versions of crate".
#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc)]

use chrono::NaiveDate;
use musebook_core::environment::Clock;
use musebook_core::error::StorageError;
use musebook_core::materializer::BookingMaterializer;
use musebook_core::pricing::Rupees;
use musebook_core::types::{BookingDraft, BookingId, MuseumInfo, Visitor};
use std::sync::Arc;

use musebook_testing::{FixedClock, MemoryBookingStore, RecordingMailer, ScriptedIds};

    fn sample_draft() -> BookingDraft {
        BookingDraft {
            booking_id: BookingId::new(654_321),
            transaction_id: "TXN123".to_string(),
            visitors: vec![Visitor::new("Alice", 30), Visitor::new("Bob", 8)],
            total_price: Rupees::new(150),
            visit_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            email: "alice@example.com".to_string(),
        }
    }

    fn materializer(
        store: Arc<MemoryBookingStore>,
        mailer: Arc<RecordingMailer>,
    ) -> BookingMaterializer {
        BookingMaterializer::new(
            store,
            mailer,
            Arc::new(ScriptedIds::default()),
            Arc::new(FixedClock::default()),
            MuseumInfo::default(),
        )
    }

    #[tokio::test]
    async fn persists_one_ticket_per_visitor() {
        let store = Arc::new(MemoryBookingStore::default());
        let mailer = Arc::new(RecordingMailer::default());

        let booking = materializer(store.clone(), mailer.clone())
            .materialize(sample_draft())
            .await
            .unwrap();

        assert_eq!(booking.quantity(), 2);
        assert_eq!(booking.booking_date, FixedClock::default().now());
        assert_eq!(booking.tickets[0].price, Rupees::new(100));
        assert_eq!(booking.tickets[1].price, Rupees::new(50));

        let saved = store.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0], booking);
    }

    #[tokio::test]
    async fn dispatches_confirmation_email_after_save() {
        let store = Arc::new(MemoryBookingStore::default());
        let mailer = Arc::new(RecordingMailer::default());

        materializer(store, mailer.clone())
            .materialize(sample_draft())
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "alice@example.com");
        assert_eq!(sent[0].subject, "City Art Museum - Booking Confirmation");
        assert!(sent[0].html_body.contains("654321"));
    }

    #[tokio::test]
    async fn storage_failure_aborts_without_email() {
        let store = Arc::new(MemoryBookingStore::default());
        store.fail_next_save();
        let mailer = Arc::new(RecordingMailer::default());

        let result = materializer(store.clone(), mailer.clone())
            .materialize(sample_draft())
            .await;

        assert!(matches!(result, Err(StorageError::Database(_))));
        assert!(store.saved().is_empty());
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn email_failure_does_not_fail_the_booking() {
        let store = Arc::new(MemoryBookingStore::default());
        let mailer = Arc::new(RecordingMailer::default());
        mailer.fail_next_send();

        let result = materializer(store.clone(), mailer)
            .materialize(sample_draft())
            .await;

        assert!(result.is_ok());
        assert_eq!(store.saved().len(), 1);
    }

    #[tokio::test]
    async fn logo_is_embedded_when_configured() {
        let store = Arc::new(MemoryBookingStore::default());
        let mailer = Arc::new(RecordingMailer::default());

        materializer(store, mailer.clone())
            .with_logo(Some(vec![0x89, 0x50, 0x4e, 0x47]))
            .materialize(sample_draft())
            .await
            .unwrap();

        let sent = mailer.sent();
        assert!(sent[0].inline_png.is_some());
        assert!(sent[0].html_body.contains("cid:museum_logo"));
    }
