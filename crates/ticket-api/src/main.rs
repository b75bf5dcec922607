//! # Concert Tickets Gateway
//!
//! Sends purchase confirmation emails on behalf of the checkout page.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export RESEND_API_KEY=re_...
//! export EMAIL_FROM="Concierto Tickets <tickets@example.com>"
//!
//! # Run the server
//! ticket-gateway
//! ```

use ticket_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Ticket types loaded: {}", state.catalog.tickets().len());
    info!("Email provider: {}", state.gateway.provider_name());
    info!("Sender identity: {}", state.gateway.settings().sender_identity);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🎫 Concert Tickets gateway starting on http://{}", addr);

    if !is_prod {
        info!("📝 Health: http://{}/health", addr);
        info!("📧 Notify: POST http://{}/api/send-email", addr);
        info!("💺 Seats: GET http://{}/api/v1/seats", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  🎵 Concert Tickets RS 🎵
  ━━━━━━━━━━━━━━━━━━━━━━━━
  Purchase confirmation gateway
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
