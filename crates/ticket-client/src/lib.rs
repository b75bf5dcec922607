//! # ticket-client
//!
//! Buyer-side pieces of concert-tickets-rs.
//!
//! This crate provides:
//! - `GatewayClient`, a `ConfirmationNotifier` that posts to the HTTP gateway
//! - `screen::render` for a text rendition of every checkout stage
//! - `Command` parsing and execution for the `ticket-kiosk` binary
//! - `KioskArgs`, the binary's command-line flags

pub mod cli;
pub mod command;
pub mod gateway_client;
pub mod screen;

pub use cli::KioskArgs;
pub use command::{confirmation_notice, Command, CommandError, Reaction};
pub use gateway_client::{GatewayClient, DEFAULT_GATEWAY_URL};
