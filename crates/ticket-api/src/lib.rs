//! # ticket-api
//!
//! HTTP notification gateway for concert-tickets-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The purchase-confirmation endpoint backed by `NotificationGateway`
//! - Read-only catalog endpoints for clients
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/send-email` | Send purchase confirmation |
//! | POST | `/api/v1/notify-purchase` | Same, versioned path |
//! | GET | `/api/v1/tickets` | List ticket types |
//! | GET | `/api/v1/seats` | Seat grid with availability |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
