//! # Notification Gateway
//!
//! Validates purchase confirmations and forwards them to the email
//! provider. Holds no state between calls.
//!
//! Outcome mapping:
//! - credential missing            → `NotifyError::Configuration`
//! - required field missing        → `NotifyError::MissingFields`
//! - provider reports failure      → `NotifyError::Provider` (detail verbatim)
//! - anything else going wrong     → `NotifyError::Internal`

use crate::error::{NotifyError, NotifyResult};
use crate::notification::{
    BoxedEmailSender, ConfirmationNotifier, NotificationAck, NotificationRequest, OutboundEmail,
    PurchaseNoticePayload,
};
use crate::template::{render_confirmation_html, EventDetails, TicketCode, CONFIRMATION_SUBJECT};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Default sender identity (the provider's shared test domain)
pub const DEFAULT_SENDER: &str = "Concierto Tickets <onboarding@resend.dev>";

/// Gateway configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    /// `From:` header of outgoing mail
    pub sender_identity: String,
    /// Event printed on every ticket
    pub event: EventDetails,
}

impl GatewaySettings {
    /// Load from environment variables (`EMAIL_FROM`)
    pub fn from_env() -> Self {
        Self {
            sender_identity: std::env::var("EMAIL_FROM")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SENDER.to_string()),
            event: EventDetails::default(),
        }
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            sender_identity: DEFAULT_SENDER.to_string(),
            event: EventDetails::default(),
        }
    }
}

/// Forwards purchase confirmations to an [`EmailSender`](crate::EmailSender)
#[derive(Clone)]
pub struct NotificationGateway {
    sender: BoxedEmailSender,
    settings: GatewaySettings,
}

impl NotificationGateway {
    pub fn new(sender: BoxedEmailSender, settings: GatewaySettings) -> Self {
        Self { sender, settings }
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    pub fn provider_name(&self) -> &'static str {
        self.sender.provider_name()
    }

    /// Is the provider credential available right now
    pub fn check_configured(&self) -> NotifyResult<()> {
        self.sender.check_configured().map_err(|e| {
            error!("Email provider not configured: {}", e);
            e
        })
    }

    /// Handle one confirmation request end to end
    #[instrument(skip(self, payload), fields(provider = self.sender.provider_name()))]
    pub async fn dispatch(&self, payload: PurchaseNoticePayload) -> NotifyResult<NotificationAck> {
        self.check_configured()?;

        let request = payload.validate().map_err(|e| {
            warn!("Rejected confirmation request: {}", e);
            e
        })?;

        self.deliver(&request).await
    }

    /// Build the email for a validated request
    pub fn compose(&self, request: &NotificationRequest, now: DateTime<Utc>) -> OutboundEmail {
        let code = TicketCode::generate(&request.seat_number, now);
        OutboundEmail {
            from: self.settings.sender_identity.clone(),
            to: vec![request.to.clone()],
            subject: CONFIRMATION_SUBJECT.to_string(),
            html: render_confirmation_html(request, &code, &self.settings.event),
            idempotency_key: Uuid::new_v4().to_string(),
        }
    }

    async fn deliver(&self, request: &NotificationRequest) -> NotifyResult<NotificationAck> {
        let email = self.compose(request, Utc::now());

        info!("Sending confirmation email to {}", request.to);

        match self.sender.send(&email).await {
            Ok(receipt) => {
                info!("Confirmation email sent: id={}", receipt.id);
                Ok(NotificationAck {
                    id: Some(receipt.id),
                    data: receipt.raw,
                })
            }
            Err(e @ NotifyError::Provider { .. }) | Err(e @ NotifyError::Configuration(_)) => {
                error!("Email provider error: {}", e);
                Err(e)
            }
            Err(other) => {
                error!("Unexpected failure sending email: {}", other);
                Err(NotifyError::Internal(other.to_string()))
            }
        }
    }
}

#[async_trait]
impl ConfirmationNotifier for NotificationGateway {
    async fn notify(&self, request: &NotificationRequest) -> NotifyResult<NotificationAck> {
        self.dispatch(request.clone().into()).await
    }

    fn name(&self) -> &'static str {
        "in-process"
    }
}
