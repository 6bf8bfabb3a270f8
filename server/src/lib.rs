//! # Musebook Server
//!
//! Imperative shell for the Musebook booking chatbot.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← HTTP, JSON, CORS, tracing
//! │  - /chat, /health, /ready               │  ← Session store, SMTP, QR
//! ├─────────────────────────────────────────┤
//! │         Functional Core                 │
//! │  - Dialog state machine (musebook-core) │  ← Testable at memory speed
//! │  - Pricing, materializer                │  ← No I/O, injected traits
//! └─────────────────────────────────────────┘
//! ```
//!
//! A chat turn flows: extract `{message, session_id}` → resolve the session
//! (create-on-first-use) → run the dialog machine under the per-session lock
//! → on the terminal transition, materialize the booking (transactional
//! write + confirmation email) → serialize the structured response.

pub mod chat;
pub mod config;
pub mod handlers;
pub mod notify;
pub mod qr;
pub mod routes;
pub mod session_store;
pub mod state;

// Re-export key types for convenience
pub use chat::{ChatOutcome, ChatService};
pub use config::Config;
pub use routes::build_router;
pub use state::AppState;
