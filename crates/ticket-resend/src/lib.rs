//! # ticket-resend
//!
//! Resend email provider for concert-tickets-rs.
//!
//! `ResendEmailSender` implements `EmailSender` on top of the Resend
//! `POST /emails` endpoint. The API key is looked up on every request, so
//! a gateway started without `RESEND_API_KEY` answers with a configuration
//! error instead of refusing to boot.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ticket_core::{GatewaySettings, NotificationGateway};
//! use ticket_resend::ResendEmailSender;
//!
//! let sender = ResendEmailSender::from_env()?;
//! let gateway = NotificationGateway::new(Arc::new(sender), GatewaySettings::from_env());
//!
//! let ack = gateway.dispatch(payload).await?;
//! ```

pub mod config;
pub mod sender;

// Re-exports
pub use config::{CredentialSource, ResendConfig, API_KEY_VAR, DEFAULT_API_BASE_URL};
pub use sender::ResendEmailSender;
