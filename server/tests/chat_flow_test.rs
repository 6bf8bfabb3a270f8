//! Endpoint-level tests for the chat flow.
//!
//! Drives the full booking conversation through the HTTP router with mock
//! collaborators: deterministic ids and clock, a recording store and
//! mailer, and a static payment code.

#![allow(clippy::expect_used)] // Integration tests can use expect for setup
#![allow(clippy::unwrap_used)] // Clear failures beat error plumbing in tests

use axum::http::StatusCode;
use axum_test::TestServer;
use musebook_core::dialog::DialogEnvironment;
use musebook_core::materializer::BookingMaterializer;
use musebook_core::pricing::Rupees;
use musebook_core::types::MuseumInfo;
use musebook_server::chat::ChatService;
use musebook_server::routes::build_router;
use musebook_server::state::AppState;
use musebook_testing::{
    FixedClock, MemoryBookingStore, RecordingMailer, ScriptedIds, StaticPaymentCode,
};
use serde_json::{json, Value};
use std::sync::Arc;

struct TestApp {
    server: TestServer,
    store: Arc<MemoryBookingStore>,
    mailer: Arc<RecordingMailer>,
}

fn test_app() -> TestApp {
    let store = Arc::new(MemoryBookingStore::default());
    let mailer = Arc::new(RecordingMailer::default());
    let ids = Arc::new(ScriptedIds::default());

    let env = DialogEnvironment::new(
        ids.clone(),
        Arc::new(StaticPaymentCode::default()),
        MuseumInfo::default(),
    );
    let materializer = BookingMaterializer::new(
        store.clone(),
        mailer.clone(),
        ids,
        Arc::new(FixedClock::default()),
        MuseumInfo::default(),
    );

    let state = AppState::new(Arc::new(ChatService::new(env, materializer)), None);
    let server = TestServer::new(build_router(state)).expect("failed to build test server");
    TestApp {
        server,
        store,
        mailer,
    }
}

async fn send(app: &TestApp, session_id: &str, message: &str) -> Value {
    let response = app
        .server
        .post("/chat")
        .json(&json!({"session_id": session_id, "message": message}))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

fn message_of(response: &Value) -> &str {
    response["content"]["message"].as_str().expect("message")
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = test_app();
    let response = app.server.get("/health").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn readiness_without_database_handle_reports_ready() {
    let app = test_app();
    let response = app.server.get("/ready").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["ready"], true);
}

#[tokio::test]
async fn full_booking_conversation() {
    let app = test_app();
    let sid = "e2e";

    let greeting = send(&app, sid, "hi").await;
    assert_eq!(greeting["type"], "options");
    assert_eq!(greeting["content"]["title"], "Welcome to City Art Museum!");

    let quantity_prompt = send(&app, sid, "book tickets").await;
    assert_eq!(quantity_prompt["type"], "text");
    assert!(message_of(&quantity_prompt).contains("How many tickets"));

    let visitor_one = send(&app, sid, "2").await;
    assert!(message_of(&visitor_one).contains("visitor 1"));

    let visitor_two = send(&app, sid, "Alice:30").await;
    assert!(message_of(&visitor_two).contains("visitor 2"));

    let email_prompt = send(&app, sid, "Bob:8").await;
    assert!(message_of(&email_prompt).contains("₹150"));

    let date_prompt = send(&app, sid, "alice@example.com").await;
    assert!(message_of(&date_prompt).contains("YYYY-MM-DD"));

    let payment_gate = send(&app, sid, "2025-06-01").await;
    assert_eq!(payment_gate["type"], "options");
    assert!(message_of(&payment_gate).contains("June 01, 2025"));

    let payment = send(&app, sid, "yes").await;
    assert_eq!(payment["type"], "payment");
    assert_eq!(payment["content"]["qr_code"], StaticPaymentCode::CODE);
    assert!(message_of(&payment).contains("123456"));

    let confirmation = send(&app, sid, "TXN123").await;
    assert_eq!(confirmation["type"], "confirmation");
    assert!(message_of(&confirmation).contains("123456"));
    assert!(message_of(&confirmation).contains("alice@example.com"));

    // Exactly one booking with one ticket per visitor.
    let saved = app.store.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].quantity(), 2);
    assert_eq!(saved[0].total_price, Rupees::new(150));
    assert_eq!(saved[0].transaction_id, "TXN123");
    assert_eq!(saved[0].booking_date, FixedClock::default().0);

    // Confirmation email went to the captured address.
    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "alice@example.com");

    // The session reset: the next message is answered from the main menu.
    let after = send(&app, sid, "book tickets").await;
    assert!(message_of(&after).contains("How many tickets"));
}

#[tokio::test]
async fn invalid_inputs_reprompt_over_http() {
    let app = test_app();
    let sid = "reprompt";

    send(&app, sid, "hi").await;
    send(&app, sid, "book").await;

    let non_numeric = send(&app, sid, "abc").await;
    assert!(message_of(&non_numeric).contains("valid number"));

    for out_of_range in ["0", "11"] {
        let reply = send(&app, sid, out_of_range).await;
        assert!(message_of(&reply).contains("between 1 and 10"));
    }

    send(&app, sid, "1").await;
    let malformed_visitor = send(&app, sid, "Alice30").await;
    assert!(message_of(&malformed_visitor).contains("'Name: Age'"));

    // Still waiting for visitor 1: nothing was recorded.
    let accepted = send(&app, sid, "Alice:30").await;
    assert!(message_of(&accepted).contains("₹100"));
}

#[tokio::test]
async fn storage_failure_keeps_session_resumable_with_same_booking_id() {
    let app = test_app();
    let sid = "retry";

    for input in [
        "hi",
        "book",
        "2",
        "Alice:30",
        "Bob:8",
        "alice@example.com",
        "2025-06-01",
        "yes",
    ] {
        send(&app, sid, input).await;
    }

    app.store.fail_next_save();
    let failed = app
        .server
        .post("/chat")
        .json(&json!({"session_id": sid, "message": "TXN123"}))
        .await;
    failed.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = failed.json::<Value>();
    assert_eq!(body["type"], "text");
    assert!(message_of(&body).contains("contact support"));
    assert!(app.store.saved().is_empty());
    assert!(app.mailer.sent().is_empty());

    // The session is still parked at the transaction step; resubmitting
    // retries with the same booking id but fresh ticket ids.
    let confirmation = send(&app, sid, "TXN999").await;
    assert_eq!(confirmation["type"], "confirmation");
    assert!(message_of(&confirmation).contains("123456"));

    let saved = app.store.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].transaction_id, "TXN999");
    let ticket_ids: Vec<u32> = saved[0].tickets.iter().map(|t| t.ticket_id.get()).collect();
    assert_eq!(ticket_ids, vec![1_000_003, 1_000_004]);
}

#[tokio::test]
async fn email_failure_does_not_block_the_confirmation() {
    let app = test_app();
    let sid = "email-down";

    for input in [
        "hi",
        "book",
        "1",
        "Alice:30",
        "alice@example.com",
        "2025-06-01",
        "yes",
    ] {
        send(&app, sid, input).await;
    }

    app.mailer.fail_next_send();
    let confirmation = send(&app, sid, "TXN123").await;
    assert_eq!(confirmation["type"], "confirmation");
    assert_eq!(app.store.saved().len(), 1);
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn declining_payment_is_a_valid_transition_not_an_error() {
    let app = test_app();
    let sid = "decline";

    for input in [
        "hi",
        "book",
        "1",
        "Alice:30",
        "alice@example.com",
        "2025-06-01",
    ] {
        send(&app, sid, input).await;
    }

    let declined = send(&app, sid, "no").await;
    assert_eq!(declined["type"], "options");
    assert_eq!(declined["content"]["options"][0], "Start new booking");

    // Back at the main menu: booking keywords start over.
    let restart = send(&app, sid, "Start new booking").await;
    assert!(message_of(&restart).contains("How many tickets"));
}

#[tokio::test]
async fn sessions_are_isolated_from_each_other() {
    let app = test_app();

    send(&app, "first", "hi").await;
    send(&app, "first", "book").await;
    send(&app, "first", "2").await;

    // A brand-new session id starts at the greeting, unaffected.
    let greeting = send(&app, "second", "hello").await;
    assert_eq!(greeting["type"], "options");
    assert_eq!(greeting["content"]["title"], "Welcome to City Art Museum!");

    // And the first session is still collecting visitor 1.
    let reply = send(&app, "first", "Alice:30").await;
    assert!(message_of(&reply).contains("visitor 2"));
}

#[tokio::test]
async fn info_request_keeps_the_menu_available() {
    let app = test_app();
    let sid = "info";

    send(&app, sid, "hi").await;
    let info = send(&app, sid, "tell me about the museum").await;
    assert_eq!(info["type"], "info");
    assert_eq!(info["content"]["details"].as_array().unwrap().len(), 4);

    // Stage did not move: booking still reachable from the menu.
    let booking = send(&app, sid, "book tickets").await;
    assert!(message_of(&booking).contains("How many tickets"));
}
