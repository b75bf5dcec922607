//! # Session State
//!
//! Stages of the checkout flow, the buyer's selections, raw form inputs
//! and the confirmation-email status.

use crate::catalog::Ticket;
use crate::seat::SeatId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One discrete step of the checkout flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Login,
    Tickets,
    Seats,
    Checkout,
    Confirmation,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Login => "login",
            Stage::Tickets => "tickets",
            Stage::Seats => "seats",
            Stage::Checkout => "checkout",
            Stage::Confirmation => "confirmation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the buyer has committed to so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<Ticket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat: Option<SeatId>,
}

impl UserSession {
    pub fn is_empty(&self) -> bool {
        self.email.is_empty() && self.ticket.is_none() && self.seat.is_none()
    }

    /// Ticket and seat are both chosen
    pub fn is_ready_for_checkout(&self) -> bool {
        self.ticket.is_some() && self.seat.is_some()
    }
}

/// Raw text inputs typed into the forms.
///
/// Card number, expiry and CVC are collected but never checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    pub email: String,
    pub password: String,
    pub card_name: String,
    pub card_number: String,
    pub card_expiry: String,
    pub card_cvc: String,
}

impl FormInputs {
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Email => self.email = value,
            FormField::Password => self.password = value,
            FormField::CardName => self.card_name = value,
            FormField::CardNumber => self.card_number = value,
            FormField::CardExpiry => self.card_expiry = value,
            FormField::CardCvc => self.card_cvc = value,
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Email => &self.email,
            FormField::Password => &self.password,
            FormField::CardName => &self.card_name,
            FormField::CardNumber => &self.card_number,
            FormField::CardExpiry => &self.card_expiry,
            FormField::CardCvc => &self.card_cvc,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Addresses a single form input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Email,
    Password,
    CardName,
    CardNumber,
    CardExpiry,
    CardCvc,
}

/// Outcome of the last confirmation-email attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    #[default]
    Unset,
    Pending,
    Success,
    Error,
}

impl EmailStatus {
    /// The attempt has finished one way or the other
    pub fn is_settled(&self) -> bool {
        matches!(self, EmailStatus::Success | EmailStatus::Error)
    }

    /// Line shown on the confirmation screen
    pub fn confirmation_message(&self) -> &'static str {
        match self {
            EmailStatus::Success => "📧 Confirmation email sent! Check your inbox",
            EmailStatus::Error => {
                "⚠️ The email could not be sent, but your purchase is confirmed"
            }
            EmailStatus::Pending => "📤 Sending confirmation email...",
            EmailStatus::Unset => "✅ Your purchase has been registered",
        }
    }
}
