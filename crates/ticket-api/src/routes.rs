//! # Routes
//!
//! Axum router configuration for the notification gateway.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - POST /api/send-email - Send purchase confirmation
/// - POST /api/v1/notify-purchase - Same handler, versioned path
/// - GET  /api/v1/tickets - List ticket types
/// - GET  /api/v1/seats - Seat grid
/// - GET  /health, / - Health check
pub fn create_router(state: AppState) -> Router {
    // Browser clients call the gateway cross-origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/notify-purchase", post(handlers::notify_purchase))
        .route("/tickets", get(handlers::list_tickets))
        .route("/seats", get(handlers::list_seats));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // Path the checkout page posts to
        .route("/api/send-email", post(handlers::notify_purchase))
        // API v1
        .nest("/api/v1", api_routes)
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        // State
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppConfig;
    use async_trait::async_trait;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use ticket_core::{
        Catalog, EmailSender, GatewaySettings, NotificationGateway, NotifyError, NotifyResult,
        OutboundEmail, SendReceipt,
    };
    use ticket_resend::{ResendConfig, ResendEmailSender};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    enum Outcome {
        Accept,
        Reject(&'static str),
        Unreachable,
    }

    struct StubSender {
        configured: bool,
        outcome: Outcome,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmailSender for StubSender {
        async fn send(&self, _email: &OutboundEmail) -> NotifyResult<SendReceipt> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                Outcome::Accept => Ok(SendReceipt {
                    id: "email_123".into(),
                    raw: json!({"id": "email_123"}),
                }),
                Outcome::Reject(message) => Err(NotifyError::Provider {
                    provider: "stub".into(),
                    message: message.into(),
                }),
                Outcome::Unreachable => Err(NotifyError::Network("connection refused".into())),
            }
        }

        fn check_configured(&self) -> NotifyResult<()> {
            if self.configured {
                Ok(())
            } else {
                Err(NotifyError::Configuration("RESEND_API_KEY not set".into()))
            }
        }

        fn provider_name(&self) -> &'static str {
            "stub"
        }
    }

    fn test_config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
        }
    }

    fn server_with(sender: Arc<StubSender>) -> TestServer {
        let gateway = NotificationGateway::new(sender, GatewaySettings::default());
        let state = AppState::with_gateway(gateway, Catalog::default(), test_config());
        TestServer::new(create_router(state)).unwrap()
    }

    fn stub(configured: bool, outcome: Outcome) -> Arc<StubSender> {
        Arc::new(StubSender {
            configured,
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    fn purchase() -> Value {
        json!({
            "to": "a@b.com",
            "customerName": "Jane Doe",
            "ticketType": "General",
            "ticketPrice": 80,
            "seatNumber": "A1"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let server = server_with(stub(true, Outcome::Accept));

        let response = server.get("/health").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["emailProvider"], "stub");

        server.get("/").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_send_email_success() {
        let sender = stub(true, Outcome::Accept);
        let server = server_with(sender.clone());

        let response = server.post("/api/send-email").json(&purchase()).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Email sent");
        assert_eq!(body["data"]["id"], "email_123");
        assert_eq!(sender.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_versioned_path_shares_handler() {
        let server = server_with(stub(true, Outcome::Accept));

        let response = server.post("/api/v1/notify-purchase").json(&purchase()).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["success"], true);
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let sender = stub(true, Outcome::Accept);
        let server = server_with(sender.clone());

        let mut body = purchase();
        body.as_object_mut().unwrap().remove("customerName");

        let response = server.post("/api/send-email").json(&body).await;

        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Missing required fields");
        assert_eq!(sender.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let server = server_with(stub(true, Outcome::Accept));

        let response = server.post("/api/send-email").text("{not json").await;

        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn test_unconfigured_outranks_bad_body() {
        let sender = stub(false, Outcome::Accept);
        let server = server_with(sender.clone());

        for response in [
            server.post("/api/send-email").json(&purchase()).await,
            server.post("/api/send-email").text("{not json").await,
        ] {
            response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
            let body: Value = response.json();
            assert_eq!(body["success"], false);
            assert_eq!(body["error"], "Email service not configured");
            assert!(body.get("details").is_none());
        }
        assert_eq!(sender.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_reported_in_band() {
        let server = server_with(stub(
            true,
            Outcome::Reject("You can only send testing emails to your own email address"),
        ));

        let response = server.post("/api/send-email").json(&purchase()).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Failed to send email");
        assert_eq!(
            body["details"],
            "You can only send testing emails to your own email address"
        );
    }

    #[tokio::test]
    async fn test_unexpected_failure_is_internal_error() {
        let server = server_with(stub(true, Outcome::Unreachable));

        let response = server.post("/api/send-email").json(&purchase()).await;

        response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<Value>()["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_tickets_listing() {
        let server = server_with(stub(true, Outcome::Accept));

        let body: Value = server.get("/api/v1/tickets").await.json();
        assert_eq!(body["count"], 3);
        assert_eq!(body["tickets"][0]["type"], "VIP");
        assert_eq!(body["tickets"][0]["price"], 150.0);
    }

    #[tokio::test]
    async fn test_seat_grid() {
        let server = server_with(stub(true, Outcome::Accept));

        let body: Value = server.get("/api/v1/seats").await.json();
        assert_eq!(body["count"], 25);
        assert_eq!(body["available"], 20);
        assert_eq!(body["unavailable"], 5);
        assert_eq!(body["rows"], json!(["A", "B", "C", "D", "E"]));

        let seats = body["seats"].as_array().unwrap();
        let a3 = seats.iter().find(|s| s["id"] == "A3").unwrap();
        assert_eq!(a3["state"], "unavailable");
        let a1 = seats.iter().find(|s| s["id"] == "A1").unwrap();
        assert_eq!(a1["state"], "available");
    }

    #[tokio::test]
    async fn test_through_resend_adapter() {
        let resend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "re_msg_1"})))
            .expect(1)
            .mount(&resend)
            .await;

        let config = ResendConfig::new("re_test_123").with_api_base_url(resend.uri());
        let sender = ResendEmailSender::new(config).unwrap();
        let gateway = NotificationGateway::new(Arc::new(sender), GatewaySettings::default());
        let state = AppState::with_gateway(gateway, Catalog::default(), test_config());
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server.post("/api/v1/notify-purchase").json(&purchase()).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["id"], "re_msg_1");
    }
}
