//! The dialog state machine.
//!
//! One conversation, one free-text input channel. Each call to
//! [`DialogMachine::handle`] validates the input for the current stage,
//! mutates the session in place, and yields exactly one [`Turn`]: either a
//! structured reply, or (on the terminal transition) a [`BookingDraft`]
//! for the shell to materialize. A branch never both advances the stage and
//! re-prompts.
//!
//! Malformed input is recovered locally as a re-prompt with the session
//! untouched. Only internal faults (QR rendering, inconsistent accumulated
//! state) surface as [`DialogError`]; the turn boundary converts those into
//! the generic fallback response.

use crate::environment::{IdSource, PaymentCodeRenderer};
use crate::error::DialogError;
use crate::pricing::Rupees;
use crate::response::ChatResponse;
use crate::session::{Session, Stage};
use crate::types::{BookingDraft, MuseumInfo, Visitor};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

/// Smallest bookable party.
pub const MIN_TICKETS: i64 = 1;

/// Largest bookable party.
pub const MAX_TICKETS: i64 = 10;

/// Injected dependencies for the dialog machine.
#[derive(Clone)]
pub struct DialogEnvironment {
    /// Booking id generator.
    pub ids: Arc<dyn IdSource>,
    /// Payment QR collaborator.
    pub payment_codes: Arc<dyn PaymentCodeRenderer>,
    /// Museum facts for the greeting and info panels.
    pub museum: MuseumInfo,
}

impl DialogEnvironment {
    /// Creates a new `DialogEnvironment`.
    #[must_use]
    pub fn new(
        ids: Arc<dyn IdSource>,
        payment_codes: Arc<dyn PaymentCodeRenderer>,
        museum: MuseumInfo,
    ) -> Self {
        Self {
            ids,
            payment_codes,
            museum,
        }
    }
}

/// Outcome of one dialog turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    /// Reply to the user; the session already reflects any stage change.
    Reply(ChatResponse),

    /// The conversation is complete: materialize this draft. The caller
    /// emits the confirmation and resets the session on success, or the
    /// storage apology, leaving the session untouched, on failure.
    Finalize {
        /// Accumulated booking data including the transaction reference.
        draft: BookingDraft,
    },
}

/// The dialog state machine. Stateless; all conversation state lives in the
/// [`Session`] passed to [`handle`](Self::handle).
#[derive(Clone, Copy, Debug, Default)]
pub struct DialogMachine;

impl DialogMachine {
    /// Creates a new `DialogMachine`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Advance the conversation by one free-text input.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError`] on an internal fault while computing the
    /// response, never for malformed user input, which is answered with a
    /// re-prompt reply instead.
    pub fn handle(
        &self,
        session: &mut Session,
        input: &str,
        env: &DialogEnvironment,
    ) -> Result<Turn, DialogError> {
        debug!(stage = ?session.stage, "processing dialog turn");
        match session.stage {
            Stage::Greeting => Ok(Self::greet(session, &env.museum)),
            Stage::MainMenu => Ok(Self::main_menu(session, input, &env.museum)),
            Stage::AskQuantity => Ok(Self::ask_quantity(session, input)),
            Stage::CollectVisitor => Self::collect_visitor(session, input),
            Stage::AskEmail => Ok(Self::ask_email(session, input)),
            Stage::AskVisitDate => Ok(Self::ask_visit_date(session, input)),
            Stage::ConfirmPayment => Self::confirm_payment(session, input, env),
            Stage::AwaitTransaction => Self::await_transaction(session, input),
        }
    }

    /// Greeting ignores its input and always advances to the main menu.
    fn greet(session: &mut Session, museum: &MuseumInfo) -> Turn {
        session.stage = Stage::MainMenu;
        Turn::Reply(ChatResponse::Options {
            title: Some(format!("Welcome to {}!", museum.name)),
            message: "How can I assist you today?".to_string(),
            options: menu_options(),
        })
    }

    fn main_menu(session: &mut Session, input: &str, museum: &MuseumInfo) -> Turn {
        let lowered = input.to_lowercase();
        if lowered.contains("book") || lowered.contains("ticket") {
            session.stage = Stage::AskQuantity;
            return Turn::Reply(ChatResponse::text(
                "Great! Let's book your tickets. How many tickets do you need?",
            ));
        }
        if lowered.contains("information") || lowered.contains("about") {
            // Info panel leaves the stage where it is.
            return Turn::Reply(ChatResponse::Info {
                title: "Museum Information".to_string(),
                message: "Here's some information about our museum:".to_string(),
                details: vec![
                    format!("Name: {}", museum.name),
                    format!("Address: {}", museum.address),
                    format!("Hours: {}", museum.hours),
                    format!("Phone: {}", museum.phone),
                ],
                question: "Would you like to book tickets now?".to_string(),
                options: yes_no(),
            });
        }
        Turn::Reply(ChatResponse::Options {
            title: None,
            message: "I'm sorry, I didn't understand. Would you like to book tickets or get \
                      information about our museum?"
                .to_string(),
            options: menu_options(),
        })
    }

    fn ask_quantity(session: &mut Session, input: &str) -> Turn {
        match input.trim().parse::<i64>() {
            Ok(quantity) if (MIN_TICKETS..=MAX_TICKETS).contains(&quantity) => {
                #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
                let quantity = quantity as u32;
                session.quantity = Some(quantity);
                session.visitors.clear();
                session.stage = Stage::CollectVisitor;
                Turn::Reply(ChatResponse::text(
                    "Great! Now, please provide the name and age for visitor 1 in the format \
                     'Name: Age'.",
                ))
            }
            Ok(_) => Turn::Reply(ChatResponse::text(
                "I'm sorry, we can only process bookings for 1-10 people at a time. Please \
                 enter a number between 1 and 10.",
            )),
            Err(_) => Turn::Reply(ChatResponse::text(
                "Please enter a valid number for the quantity of tickets.",
            )),
        }
    }

    fn collect_visitor(session: &mut Session, input: &str) -> Result<Turn, DialogError> {
        let Some((name, age)) = input.split_once(':') else {
            return Ok(Turn::Reply(visitor_format_prompt()));
        };
        let Ok(age) = age.trim().parse::<u32>() else {
            return Ok(Turn::Reply(ChatResponse::text(
                "Please enter a valid age as a number.",
            )));
        };
        let name = name.trim();
        if name.is_empty() {
            return Ok(Turn::Reply(visitor_format_prompt()));
        }

        let quantity = required(session.quantity.as_ref(), session.stage, "quantity")?;
        session.visitors.push(Visitor::new(name, age));

        if session.visitors.len() < quantity as usize {
            return Ok(Turn::Reply(ChatResponse::text(format!(
                "Thank you. Now, please provide the name and age for visitor {} in the format \
                 'Name: Age'.",
                session.current_visitor()
            ))));
        }

        let total: Rupees = session.visitors.iter().map(|v| v.category.price()).sum();
        session.total_price = Some(total);
        session.stage = Stage::AskEmail;
        Ok(Turn::Reply(ChatResponse::text(format!(
            "Thank you for providing all visitor details. The total price for your tickets is \
             {total}. Please provide your email address for the booking confirmation."
        ))))
    }

    fn ask_email(session: &mut Session, input: &str) -> Turn {
        if input.contains('@') && input.contains('.') {
            session.email = Some(input.trim().to_string());
            session.stage = Stage::AskVisitDate;
            Turn::Reply(ChatResponse::text(
                "Thank you. Please enter the date of your visit (YYYY-MM-DD):",
            ))
        } else {
            Turn::Reply(ChatResponse::text("Please provide a valid email address."))
        }
    }

    fn ask_visit_date(session: &mut Session, input: &str) -> Turn {
        match NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
            Ok(date) => {
                session.visit_date = Some(date);
                session.stage = Stage::ConfirmPayment;
                Turn::Reply(ChatResponse::Options {
                    title: None,
                    message: format!(
                        "Thank you. Your visit is scheduled for {}. Would you like to proceed \
                         with the payment?",
                        date.format("%B %d, %Y")
                    ),
                    options: yes_no(),
                })
            }
            Err(_) => Turn::Reply(ChatResponse::text(
                "Please enter a valid date in the format YYYY-MM-DD.",
            )),
        }
    }

    fn confirm_payment(
        session: &mut Session,
        input: &str,
        env: &DialogEnvironment,
    ) -> Result<Turn, DialogError> {
        if input.to_lowercase().contains("yes") {
            let total = required(session.total_price.as_ref(), session.stage, "total_price")?;
            let booking_id = env.ids.booking_id();
            let qr_code = env.payment_codes.render_payment_code(total)?;
            session.booking_id = Some(booking_id);
            session.stage = Stage::AwaitTransaction;
            return Ok(Turn::Reply(ChatResponse::Payment {
                title: "Payment".to_string(),
                message: format!(
                    "Great! Please scan the QR code to make the payment of {total}. Your \
                     booking ID is {booking_id}."
                ),
                qr_code,
                input_type: "text".to_string(),
                input_message: "After completing the payment, please enter the UPI transaction \
                                ID:"
                    .to_string(),
            }));
        }

        // Declining is a modeled transition back to the menu, not an error.
        session.stage = Stage::MainMenu;
        Ok(Turn::Reply(ChatResponse::Options {
            title: None,
            message: "No problem. Would you like to start over with a new booking or get more \
                      information about our museum?"
                .to_string(),
            options: vec![
                "Start new booking".to_string(),
                "Get museum information".to_string(),
            ],
        }))
    }

    fn await_transaction(session: &mut Session, input: &str) -> Result<Turn, DialogError> {
        // Any non-empty string is accepted as a payment reference; no
        // verification against a gateway takes place.
        let reference = input.trim();
        if reference.is_empty() {
            return Ok(Turn::Reply(ChatResponse::text(
                "Please enter a valid UPI transaction ID to confirm your payment.",
            )));
        }

        let stage = session.stage;
        let draft = BookingDraft {
            booking_id: required(session.booking_id.as_ref(), stage, "booking_id")?,
            transaction_id: reference.to_string(),
            visitors: session.visitors.clone(),
            total_price: required(session.total_price.as_ref(), stage, "total_price")?,
            visit_date: required(session.visit_date.as_ref(), stage, "visit_date")?,
            email: required(session.email.as_ref(), stage, "email")?,
        };
        Ok(Turn::Finalize { draft })
    }
}

fn menu_options() -> Vec<String> {
    vec![
        "Book tickets".to_string(),
        "Get museum information".to_string(),
    ]
}

fn yes_no() -> Vec<String> {
    vec!["Yes".to_string(), "No".to_string()]
}

fn visitor_format_prompt() -> ChatResponse {
    ChatResponse::text("Please provide the visitor's name and age in the format 'Name: Age'.")
}

/// A field an earlier stage should have populated.
fn required<T: Clone>(
    value: Option<&T>,
    stage: Stage,
    field: &'static str,
) -> Result<T, DialogError> {
    value
        .cloned()
        .ok_or(DialogError::IncompleteSession { stage, field })
}

