//! # Musebook Testing
//!
//! Testing utilities for the Musebook booking dialog:
//!
//! - [`DialogTest`]: fluent given/when/then harness for single dialog turns
//! - [`drive`]: run a whole input sequence through the machine
//! - Mock collaborators: [`MemoryBookingStore`], [`RecordingMailer`],
//!   [`FixedClock`], [`ScriptedIds`], [`StaticPaymentCode`]
//!
//! ## Example
//!
//! ```
//! use musebook_testing::DialogTest;
//! use musebook_core::session::Stage;
//!
//! DialogTest::new()
//!     .when_input("hello")
//!     .then_session(|session| assert_eq!(session.stage, Stage::MainMenu))
//!     .run();
//! ```

mod mocks;

pub use dialog_test::{default_dialog_env, drive, DialogTest};
pub use mocks::{FixedClock, MemoryBookingStore, RecordingMailer, ScriptedIds, StaticPaymentCode};
