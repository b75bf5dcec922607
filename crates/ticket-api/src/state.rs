//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the notification gateway, configuration, and ticket catalog.

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use ticket_core::{Catalog, GatewaySettings, NotificationGateway};
use ticket_resend::ResendEmailSender;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Confirmation-email gateway
    pub gateway: NotificationGateway,
    /// Ticket catalog and seat layout
    pub catalog: Arc<Catalog>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by Resend.
    ///
    /// A missing `RESEND_API_KEY` does not fail here; requests report it.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let catalog = Catalog::load().context("Failed to load ticket catalog")?;

        let sender = ResendEmailSender::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Resend: {}", e))?;
        let gateway = NotificationGateway::new(Arc::new(sender), GatewaySettings::from_env());

        if let Err(e) = gateway.check_configured() {
            tracing::warn!("Starting without email credentials: {}", e);
        }

        Ok(Self::with_gateway(gateway, catalog, config))
    }

    /// Assemble state from parts
    pub fn with_gateway(gateway: NotificationGateway, catalog: Catalog, config: AppConfig) -> Self {
        Self {
            gateway,
            catalog: Arc::new(catalog),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        // Clear env vars for test
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");

        let config = AppConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
        assert!(!config.is_production());
    }

    #[test]
    fn test_socket_addr_invalid_host() {
        let config = AppConfig {
            host: "not a host".to_string(),
            port: 3000,
            environment: "test".to_string(),
        };
        assert!(config.socket_addr().is_err());
    }
}
