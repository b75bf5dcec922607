//! # Gateway Client
//!
//! `ConfirmationNotifier` that reaches the notification gateway over HTTP.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use ticket_core::{
    ConfirmationNotifier, NotificationAck, NotificationRequest, NotifyError, NotifyResponse,
    NotifyResult,
};
use tracing::{debug, error, instrument};

/// Where the gateway listens when `GATEWAY_URL` is unset
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080";

/// Posts purchase confirmations to `{gateway_url}/api/send-email`
pub struct GatewayClient {
    base_url: String,
    client: Client,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>) -> NotifyResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                NotifyError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Create from environment variables (`GATEWAY_URL`)
    pub fn from_env() -> NotifyResult<Self> {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("GATEWAY_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());
        Self::new(base_url)
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/send-email", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ConfirmationNotifier for GatewayClient {
    #[instrument(skip(self, request), fields(seat = %request.seat_number))]
    async fn notify(&self, request: &NotificationRequest) -> NotifyResult<NotificationAck> {
        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Gateway error: status={}, body={}", status, body);
            return Err(NotifyError::Gateway {
                status: status.as_u16(),
                body,
            });
        }

        let reply: NotifyResponse = serde_json::from_str(&body).map_err(|e| {
            NotifyError::Serialization(format!("Failed to parse gateway response: {}", e))
        })?;

        if !reply.success {
            let reason = match (reply.error, reply.details) {
                (Some(error), Some(details)) => format!("{}: {}", error, details),
                (Some(error), None) => error,
                (None, Some(details)) => details,
                (None, None) => "no reason given".to_string(),
            };
            error!("Gateway rejected notification: {}", reason);
            return Err(NotifyError::Rejected(reason));
        }

        let data = reply.data.unwrap_or(Value::Null);
        let id = data.get("id").and_then(Value::as_str).map(String::from);
        debug!("Gateway accepted notification: id={:?}", id);

        Ok(NotificationAck { id, data })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> NotificationRequest {
        NotificationRequest {
            to: "a@b.com".into(),
            customer_name: "Jane Doe".into(),
            ticket_type: "General".into(),
            ticket_price: 80.0,
            seat_number: "A1".into(),
        }
    }

    #[tokio::test]
    async fn test_notify_posts_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/send-email"))
            .and(body_json(json!({
                "to": "a@b.com",
                "customerName": "Jane Doe",
                "ticketType": "General",
                "ticketPrice": 80.0,
                "seatNumber": "A1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"id": "email_1"},
                "message": "Email sent"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GatewayClient::new(server.uri()).unwrap();
        let ack = client.notify(&request()).await.unwrap();
        assert_eq!(ack.id.as_deref(), Some("email_1"));
    }

    #[tokio::test]
    async fn test_in_band_failure_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error": "Failed to send email",
                "details": "domain not verified"
            })))
            .mount(&server)
            .await;

        let client = GatewayClient::new(server.uri()).unwrap();
        let err = client.notify(&request()).await.unwrap_err();
        match err {
            NotifyError::Rejected(reason) => {
                assert_eq!(reason, "Failed to send email: domain not verified")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_is_gateway_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "success": false,
                "error": "Email service not configured"
            })))
            .mount(&server)
            .await;

        let client = GatewayClient::new(format!("{}/", server.uri())).unwrap();
        let err = client.notify(&request()).await.unwrap_err();
        match err {
            NotifyError::Gateway { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("Email service not configured"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_network_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = GatewayClient::new(uri).unwrap();
        let err = client.notify(&request()).await.unwrap_err();
        assert!(matches!(err, NotifyError::Network(_)));
    }

    #[test]
    fn test_endpoint() {
        let client = GatewayClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/api/send-email");
        assert_eq!(client.name(), "http");
    }
}
