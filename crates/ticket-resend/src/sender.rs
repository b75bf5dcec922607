//! # Resend Email Sender
//!
//! `EmailSender` implementation for the Resend `POST /emails` API.

use crate::config::ResendConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use ticket_core::{EmailSender, NotifyError, NotifyResult, OutboundEmail, SendReceipt};
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "resend";

/// Sends email through Resend
pub struct ResendEmailSender {
    config: ResendConfig,
    client: Client,
}

impl ResendEmailSender {
    /// Create a new Resend sender
    pub fn new(config: ResendConfig) -> NotifyResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                NotifyError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> NotifyResult<Self> {
        Self::new(ResendConfig::from_env())
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    #[instrument(skip(self, email), fields(to = ?email.to))]
    async fn send(&self, email: &OutboundEmail) -> NotifyResult<SendReceipt> {
        let auth = self.config.auth_header()?;
        let url = self.config.emails_url();

        debug!("Submitting email to Resend: subject={}", email.subject);

        let response = self
            .client
            .post(&url)
            .header("Authorization", auth)
            .header("Idempotency-Key", &email.idempotency_key)
            .json(email)
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Resend API error: status={}, body={}", status, body);

            // Parse Resend error
            if let Ok(error_response) = serde_json::from_str::<ResendErrorResponse>(&body) {
                debug!("Resend error name: {:?}", error_response.name);
                return Err(NotifyError::Provider {
                    provider: PROVIDER.to_string(),
                    message: error_response.message,
                });
            }

            return Err(NotifyError::Provider {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let raw: Value = serde_json::from_str(&body).map_err(|e| {
            NotifyError::Serialization(format!("Failed to parse Resend response: {}", e))
        })?;
        let sent: ResendSendResponse = serde_json::from_value(raw.clone()).map_err(|e| {
            NotifyError::Serialization(format!("Failed to parse Resend response: {}", e))
        })?;

        info!("Resend accepted email: id={}", sent.id);

        Ok(SendReceipt { id: sent.id, raw })
    }

    fn check_configured(&self) -> NotifyResult<()> {
        self.config.api_key.resolve().map(|_| ())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// Resend API types

#[derive(Debug, Deserialize)]
struct ResendSendResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ResendErrorResponse {
    message: String,
    #[serde(default)]
    name: Option<String>,
}
