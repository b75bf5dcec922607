//! # Error Types
//!
//! Typed errors for the checkout flow, the ticket catalog and the
//! notification gateway.

use crate::session::Stage;
use thiserror::Error;

/// Errors raised while forwarding a purchase confirmation
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Provider credential missing or unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// One or more required request fields absent or empty
    #[error("Missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    /// Request body could not be decoded
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The email provider rejected or failed the send
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Network/HTTP error while talking to a collaborator
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The gateway answered with a non-success HTTP status
    #[error("Gateway responded with HTTP {status}: {body}")]
    Gateway { status: u16, body: String },

    /// The gateway answered `success: false`
    #[error("Gateway rejected notification: {0}")]
    Rejected(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl NotifyError {
    /// Returns the HTTP status code the gateway endpoint answers with.
    ///
    /// Provider failures are reported in-band (`success: false`) on a 200,
    /// since the endpoint itself did its job.
    pub fn status_code(&self) -> u16 {
        match self {
            NotifyError::Configuration(_) => 500,
            NotifyError::MissingFields { .. } => 400,
            NotifyError::InvalidBody(_) => 400,
            NotifyError::Provider { .. } => 200,
            NotifyError::Network(_) => 500,
            NotifyError::Serialization(_) => 500,
            NotifyError::Gateway { status, .. } => *status,
            NotifyError::Rejected(_) => 200,
            NotifyError::Internal(_) => 500,
        }
    }

    /// Short, caller-facing description used as the `error` field
    pub fn public_message(&self) -> &'static str {
        match self {
            NotifyError::Configuration(_) => "Email service not configured",
            NotifyError::MissingFields { .. } | NotifyError::InvalidBody(_) => {
                "Missing required fields"
            }
            NotifyError::Provider { .. } | NotifyError::Rejected(_) => "Failed to send email",
            _ => "Internal server error",
        }
    }

    /// Extra detail safe to hand back to the caller, if any
    pub fn details(&self) -> Option<String> {
        match self {
            // never leak configuration details to callers
            NotifyError::Configuration(_) => None,
            NotifyError::MissingFields { fields } => Some(fields.join(", ")),
            NotifyError::InvalidBody(msg) => Some(msg.clone()),
            NotifyError::Provider { message, .. } => Some(message.clone()),
            NotifyError::Rejected(msg) => Some(msg.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Result type alias for notification operations
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Errors raised by the checkout state machine.
///
/// A flow error never changes the stage or the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Unknown ticket type: {0}")]
    UnknownTicket(String),

    #[error("Unknown seat: {0}")]
    UnknownSeat(String),

    #[error("No ticket selected")]
    NoTicketSelected,

    #[error("No seat selected")]
    NoSeatSelected,

    #[error("Cardholder name is required")]
    MissingCardholderName,

    #[error("Payment is already being processed")]
    AlreadyProcessing,

    #[error("Cannot {action} from the {stage} stage")]
    InvalidTransition { stage: Stage, action: &'static str },
}

/// Result type alias for checkout flow operations
pub type FlowResult<T> = Result<T, FlowError>;

/// Errors raised while loading or validating a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid seat identifier: {0:?}")]
    InvalidSeat(String),

    #[error("Invalid ticket type: {0:?}")]
    InvalidTicketType(String),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(NotifyError::Configuration("x".into()).status_code(), 500);
        assert_eq!(
            NotifyError::MissingFields { fields: vec!["to"] }.status_code(),
            400
        );
        assert_eq!(
            NotifyError::Provider {
                provider: "resend".into(),
                message: "bad".into()
            }
            .status_code(),
            200
        );
        assert_eq!(NotifyError::Network("timeout".into()).status_code(), 500);
        assert_eq!(
            NotifyError::Gateway {
                status: 502,
                body: String::new()
            }
            .status_code(),
            502
        );
    }

    #[test]
    fn test_missing_fields_message() {
        let err = NotifyError::MissingFields {
            fields: vec!["to", "seatNumber"],
        };
        assert_eq!(err.to_string(), "Missing required fields: to, seatNumber");
        assert_eq!(err.details().as_deref(), Some("to, seatNumber"));
        assert_eq!(err.public_message(), "Missing required fields");
    }

    #[test]
    fn test_configuration_details_hidden() {
        let err = NotifyError::Configuration("RESEND_API_KEY not set".into());
        assert!(err.details().is_none());
        assert_eq!(err.public_message(), "Email service not configured");
    }

    #[test]
    fn test_flow_error_display() {
        let err = FlowError::InvalidTransition {
            stage: Stage::Login,
            action: "select a seat",
        };
        assert_eq!(err.to_string(), "Cannot select a seat from the login stage");
    }
}
