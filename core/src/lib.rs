//! # Musebook Core
//!
//! Functional core for the Musebook conversational ticket-booking service.
//!
//! This crate contains the pure domain logic of the system:
//!
//! - **Pricing/Classification**: age → ticket category → price
//! - **Dialog State Machine**: one conversation's state, advanced one
//!   free-text input at a time, emitting exactly one structured response
//!   per turn
//! - **Booking Materializer**: converts a completed conversation into a
//!   persisted booking plus tickets and triggers the confirmation email
//!
//! ## Architecture
//!
//! Functional Core, Imperative Shell: everything here is synchronous domain
//! logic or orchestration over injected collaborator traits. The shell
//! (`musebook-server`) owns HTTP, the session map, and the real
//! implementations of the collaborators:
//!
//! - [`storage::BookingStore`]: transactional persistence
//! - [`notify::EmailDispatcher`]: confirmation email delivery
//! - [`environment::PaymentCodeRenderer`]: payment QR rendering
//! - [`environment::Clock`] / [`environment::IdSource`]: time and
//!   identifier generation, injected so tests are deterministic
//!
//! ## Example
//!
//! ```
//! use musebook_core::dialog::{DialogEnvironment, DialogMachine, Turn};
//! use musebook_core::environment::{PaymentCodeRenderer, ThreadRngIdSource};
//! use musebook_core::error::PaymentCodeError;
//! use musebook_core::pricing::Rupees;
//! use musebook_core::session::Session;
//! use musebook_core::types::MuseumInfo;
//! use std::sync::Arc;
//!
//! struct NoQr;
//! impl PaymentCodeRenderer for NoQr {
//!     fn render_payment_code(&self, _amount: Rupees) -> Result<String, PaymentCodeError> {
//!         Ok(String::new())
//!     }
//! }
//!
//! let machine = DialogMachine::new();
//! let env = DialogEnvironment::new(
//!     Arc::new(ThreadRngIdSource),
//!     Arc::new(NoQr),
//!     MuseumInfo::default(),
//! );
//! let mut session = Session::new();
//!
//! // The greeting always advances to the main menu.
//! let turn = machine.handle(&mut session, "hi", &env).unwrap();
//! assert!(matches!(turn, Turn::Reply(_)));
//! ```

pub mod dialog;
pub mod environment;
pub mod error;
pub mod materializer;
pub mod notify;
pub mod pricing;
pub mod response;
pub mod session;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use chrono::{DateTime, NaiveDate, Utc};
