//! Email dispatcher implementations.

pub mod console;
pub mod smtp;

pub use console::ConsoleEmailDispatcher;
pub use smtp::SmtpEmailDispatcher;
