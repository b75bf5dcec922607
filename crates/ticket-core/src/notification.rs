//! # Notification Contract
//!
//! Request/response types for purchase confirmations and the two
//! collaborator traits at the edges of the system.
//!
//! ```text
//!  CheckoutFlow ──► ConfirmationNotifier ──► NotificationGateway ──► EmailSender
//!                   (GatewayClient over HTTP,                        (Resend, ...)
//!                    or the gateway in-process)
//! ```

use crate::error::{NotifyError, NotifyResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// A validated purchase confirmation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    /// Recipient email address
    pub to: String,
    /// Cardholder name, used as the customer name
    pub customer_name: String,
    pub ticket_type: String,
    pub ticket_price: f64,
    pub seat_number: String,
}

/// Raw request body as received by the gateway.
///
/// Every field is optional here; [`PurchaseNoticePayload::validate`] turns
/// it into a [`NotificationRequest`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseNoticePayload {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub ticket_type: Option<String>,
    #[serde(default)]
    pub ticket_price: Option<f64>,
    #[serde(default)]
    pub seat_number: Option<String>,
}

impl PurchaseNoticePayload {
    /// Check that all five fields are present.
    ///
    /// Blank strings and non-positive prices count as missing. The error
    /// lists every missing wire key, not just the first one.
    pub fn validate(self) -> NotifyResult<NotificationRequest> {
        fn present(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let to = present(self.to);
        let customer_name = present(self.customer_name);
        let ticket_type = present(self.ticket_type);
        let ticket_price = self.ticket_price.filter(|p| p.is_finite() && *p > 0.0);
        let seat_number = present(self.seat_number);

        let mut missing = Vec::new();
        if to.is_none() {
            missing.push("to");
        }
        if customer_name.is_none() {
            missing.push("customerName");
        }
        if ticket_type.is_none() {
            missing.push("ticketType");
        }
        if ticket_price.is_none() {
            missing.push("ticketPrice");
        }
        if seat_number.is_none() {
            missing.push("seatNumber");
        }

        match (to, customer_name, ticket_type, ticket_price, seat_number) {
            (Some(to), Some(customer_name), Some(ticket_type), Some(ticket_price), Some(seat_number)) => {
                Ok(NotificationRequest {
                    to,
                    customer_name,
                    ticket_type,
                    ticket_price,
                    seat_number,
                })
            }
            _ => Err(NotifyError::MissingFields { fields: missing }),
        }
    }
}

impl From<NotificationRequest> for PurchaseNoticePayload {
    fn from(req: NotificationRequest) -> Self {
        Self {
            to: Some(req.to),
            customer_name: Some(req.customer_name),
            ticket_type: Some(req.ticket_type),
            ticket_price: Some(req.ticket_price),
            seat_number: Some(req.seat_number),
        }
    }
}

/// Positive acknowledgment of a sent confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationAck {
    /// Opaque identifier supplied by the email provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Whatever the provider returned
    pub data: Value,
}

/// JSON body returned by the gateway endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl NotifyResponse {
    pub fn delivered(ack: NotificationAck) -> Self {
        Self {
            success: true,
            data: Some(ack.data),
            message: Some("Email sent".to_string()),
            error: None,
            details: None,
        }
    }

    pub fn failed(err: &NotifyError) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(err.public_message().to_string()),
            details: err.details(),
        }
    }
}

/// An email ready to hand to the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    /// Sender identity, e.g. `Concierto Tickets <onboarding@resend.dev>`
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    /// Sent as `Idempotency-Key` so a retried send is not delivered twice
    #[serde(skip)]
    pub idempotency_key: String,
}

/// What the provider hands back on success
#[derive(Debug, Clone, PartialEq)]
pub struct SendReceipt {
    pub id: String,
    pub raw: Value,
}

/// The black-box "send email" capability.
///
/// Implementations: `ResendEmailSender` (ticket-resend), test doubles.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Submit one email to the provider.
    async fn send(&self, email: &OutboundEmail) -> NotifyResult<SendReceipt>;

    /// Check the provider credential is available right now.
    ///
    /// Called on every request, before any validation.
    fn check_configured(&self) -> NotifyResult<()> {
        Ok(())
    }

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared email sender (dynamic dispatch)
pub type BoxedEmailSender = Arc<dyn EmailSender>;

/// What the checkout flow calls once payment has settled.
///
/// Implementations: `GatewayClient` (ticket-client, over HTTP) and
/// `NotificationGateway` itself (in-process).
#[async_trait]
pub trait ConfirmationNotifier: Send + Sync {
    async fn notify(&self, request: &NotificationRequest) -> NotifyResult<NotificationAck>;

    fn name(&self) -> &'static str;
}

/// Type alias for a shared notifier (dynamic dispatch)
pub type BoxedNotifier = Arc<dyn ConfirmationNotifier>;
