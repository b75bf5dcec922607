//! # ticket-core
//!
//! Core types, the checkout state machine and the notification gateway
//! for concert-tickets-rs.
//!
//! This crate provides:
//! - `CheckoutFlow`, the login → tickets → seats → checkout → confirmation machine
//! - `Catalog`, `Ticket` and `SeatLayout` for what can be bought
//! - `NotificationGateway`, which validates confirmations and emails them
//! - `EmailSender` and `ConfirmationNotifier` traits for the collaborators
//! - `NotifyError` and `FlowError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use ticket_core::{Catalog, CheckoutFlow, FlowSettings, FormField, TicketType};
//!
//! let mut flow = CheckoutFlow::new(Arc::new(Catalog::load()?), notifier, FlowSettings::from_env());
//!
//! flow.set_field(FormField::Email, "a@b.com");
//! flow.set_field(FormField::Password, "x");
//! flow.login()?;
//! flow.select_ticket(TicketType::General)?;
//! flow.select_seat("A1".parse()?)?;
//! flow.continue_to_checkout()?;
//!
//! flow.set_field(FormField::CardName, "Jane Doe");
//! let pending = flow.submit_payment().await?;
//!
//! // confirmation is shown right away; the email settles in the background
//! let status = pending.settle().await;
//! ```

pub mod catalog;
pub mod error;
pub mod flow;
pub mod gateway;
pub mod notification;
pub mod seat;
pub mod session;
pub mod template;

// Re-exports for convenience
pub use catalog::{format_amount, Catalog, Price, Ticket, TicketType};
pub use error::{CatalogError, FlowError, FlowResult, NotifyError, NotifyResult};
pub use flow::{CheckoutFlow, FlowSettings, PendingNotification, SeatSelection};
pub use gateway::{GatewaySettings, NotificationGateway, DEFAULT_SENDER};
pub use notification::{
    BoxedEmailSender, BoxedNotifier, ConfirmationNotifier, EmailSender, NotificationAck,
    NotificationRequest, NotifyResponse, OutboundEmail, PurchaseNoticePayload, SendReceipt,
};
pub use seat::{SeatId, SeatLayout, SeatState};
pub use session::{EmailStatus, FormField, FormInputs, Stage, UserSession};
pub use template::{EventDetails, TicketCode};
