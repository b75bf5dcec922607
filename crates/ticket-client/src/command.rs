//! # Kiosk Commands
//!
//! Line commands typed into `ticket-kiosk` and how they drive the flow.

use std::str::FromStr;
use thiserror::Error;
use ticket_core::{
    CheckoutFlow, EmailStatus, FlowError, FormField, PendingNotification, SeatId, SeatSelection,
    TicketType,
};
use tokio::sync::watch;

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(FormField, String),
    Login,
    Ticket(TicketType),
    Seat(SeatId),
    Continue,
    Pay,
    Logout,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type `help`)")]
    Unknown(String),

    #[error("`{0}` needs a value")]
    MissingArgument(&'static str),

    #[error("{0}")]
    InvalidArgument(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let field = |field: FormField, name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(Command::Set(field, rest.to_string()))
            }
        };

        match word.to_lowercase().as_str() {
            "" | "show" => Ok(Command::Show),
            "email" => field(FormField::Email, "email"),
            "password" => field(FormField::Password, "password"),
            "card-name" => field(FormField::CardName, "card-name"),
            "card-number" => field(FormField::CardNumber, "card-number"),
            "expiry" => field(FormField::CardExpiry, "expiry"),
            "cvc" => field(FormField::CardCvc, "cvc"),
            "login" => Ok(Command::Login),
            "ticket" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("ticket"));
                }
                rest.parse()
                    .map(Command::Ticket)
                    .map_err(|e| CommandError::InvalidArgument(e.to_string()))
            }
            "seat" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("seat"));
                }
                rest.parse()
                    .map(Command::Seat)
                    .map_err(|e| CommandError::InvalidArgument(e.to_string()))
            }
            "continue" => Ok(Command::Continue),
            "pay" => Ok(Command::Pay),
            "logout" => Ok(Command::Logout),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// What the kiosk should do after a command ran
#[derive(Debug)]
pub enum Reaction {
    /// Redraw the screen, optionally with a one-line notice
    Redraw(Option<String>),
    /// Payment went through; the email is still on its way
    Paid(PendingNotification),
    Help,
    Quit,
}

impl Command {
    /// Apply the command to the flow.
    ///
    /// A `FlowError` is the user-facing alert; the flow is unchanged.
    pub async fn execute(self, flow: &mut CheckoutFlow) -> Result<Reaction, FlowError> {
        let notice = match self {
            Command::Set(field, value) => {
                flow.set_field(field, value);
                None
            }
            Command::Login => {
                flow.login()?;
                None
            }
            Command::Ticket(ticket_type) => {
                let ticket = flow.select_ticket(ticket_type)?;
                Some(format!("{} ticket selected ({})", ticket.ticket_type, ticket.price))
            }
            Command::Seat(seat) => match flow.select_seat(seat)? {
                SeatSelection::Selected(seat) => Some(format!("Seat {} selected", seat)),
                SeatSelection::Ignored(seat) => Some(format!("Seat {} is not available", seat)),
            },
            Command::Continue => {
                flow.continue_to_checkout()?;
                None
            }
            Command::Pay => return Ok(Reaction::Paid(flow.submit_payment().await?)),
            Command::Logout => {
                flow.logout();
                Some("Logged out".to_string())
            }
            Command::Show => None,
            Command::Help => return Ok(Reaction::Help),
            Command::Quit => return Ok(Reaction::Quit),
        };
        Ok(Reaction::Redraw(notice))
    }
}

/// Wait for the email and return the line to print, unless the buyer
/// logged out in the meantime.
///
/// `session` must be subscribed right after payment; logout closes it.
pub async fn confirmation_notice(
    pending: PendingNotification,
    session: watch::Receiver<EmailStatus>,
) -> Option<&'static str> {
    let status = pending.settle().await;
    session
        .has_changed()
        .is_ok()
        .then(|| status.confirmation_message())
}
