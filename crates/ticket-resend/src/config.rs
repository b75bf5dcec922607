//! # Resend Configuration
//!
//! Configuration for the Resend integration.
//! The API key comes from the environment and is read when it is needed.

use std::env;
use std::fmt;
use std::time::Duration;
use ticket_core::{NotifyError, NotifyResult};

/// Production API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.resend.com";

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "RESEND_API_KEY";

/// Where the API key comes from
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Read the named environment variable on every use
    Env(String),
    /// A fixed key (for testing)
    Fixed(String),
}

impl CredentialSource {
    /// Resolve the key, failing if it is missing or blank
    pub fn resolve(&self) -> NotifyResult<String> {
        let key = match self {
            CredentialSource::Env(var) => env::var(var)
                .map_err(|_| NotifyError::Configuration(format!("{} not set", var)))?,
            CredentialSource::Fixed(key) => key.clone(),
        };

        if key.trim().is_empty() {
            return Err(NotifyError::Configuration("API key is empty".to_string()));
        }
        Ok(key)
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Env(var) => f.debug_tuple("Env").field(var).finish(),
            CredentialSource::Fixed(_) => f.write_str("Fixed(<redacted>)"),
        }
    }
}

/// Resend API configuration
#[derive(Debug, Clone)]
pub struct ResendConfig {
    /// API key (re_...)
    pub api_key: CredentialSource,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl ResendConfig {
    /// Load configuration from environment variables.
    ///
    /// - `RESEND_API_KEY` is not read here, only on each send
    /// - `RESEND_API_BASE_URL` overrides the endpoint
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base_url = env::var("RESEND_API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Self {
            api_key: CredentialSource::Env(API_KEY_VAR.to_string()),
            api_base_url,
            timeout: Duration::from_secs(30),
        }
    }

    /// Create config with a fixed key (for testing)
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: CredentialSource::Fixed(api_key.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> NotifyResult<String> {
        Ok(format!("Bearer {}", self.api_key.resolve()?))
    }

    /// Full URL of the send endpoint
    pub fn emails_url(&self) -> String {
        format!("{}/emails", self.api_base_url.trim_end_matches('/'))
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}
