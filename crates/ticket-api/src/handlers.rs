//! # Request Handlers
//!
//! Axum request handlers for the notification gateway.

use crate::state::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use ticket_core::{
    NotificationAck, NotifyError, NotifyResponse, NotifyResult, PurchaseNoticePayload, SeatId,
    SeatState,
};
use tracing::{info, instrument, warn};

// =============================================================================
// Response Types
// =============================================================================

/// One cell of the seat grid
#[derive(Debug, Serialize)]
pub struct SeatView {
    pub id: SeatId,
    pub state: SeatState,
}

fn notify_response(result: NotifyResult<NotificationAck>) -> (StatusCode, Json<NotifyResponse>) {
    match result {
        Ok(ack) => (StatusCode::OK, Json(NotifyResponse::delivered(ack))),
        Err(err) => {
            let code = StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (code, Json(NotifyResponse::failed(&err)))
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "concert-tickets",
        "version": env!("CARGO_PKG_VERSION"),
        "emailProvider": state.gateway.provider_name(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Send the confirmation email for a completed purchase.
///
/// The body is read raw so a malformed payload gets the gateway's own
/// error shape instead of the extractor's rejection.
#[instrument(skip(state, body), fields(bytes = body.len()))]
pub async fn notify_purchase(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<NotifyResponse>) {
    let payload = match serde_json::from_slice::<PurchaseNoticePayload>(&body) {
        Ok(payload) => payload,
        Err(e) => {
            // credential problems outrank a bad body
            let err = match state.gateway.check_configured() {
                Err(config_err) => config_err,
                Ok(()) => {
                    warn!("Unreadable confirmation request: {}", e);
                    NotifyError::InvalidBody(e.to_string())
                }
            };
            return notify_response(Err(err));
        }
    };

    let result = state.gateway.dispatch(payload).await;
    if result.is_ok() {
        info!("Confirmation email dispatched");
    }
    notify_response(result)
}

/// List ticket types and prices
pub async fn list_tickets(State(state): State<AppState>) -> impl IntoResponse {
    let tickets = state.catalog.tickets();
    Json(serde_json::json!({
        "tickets": tickets,
        "count": tickets.len()
    }))
}

/// Seat grid with fixed availability
pub async fn list_seats(State(state): State<AppState>) -> impl IntoResponse {
    let layout = state.catalog.seating();
    let seats: Vec<SeatView> = layout
        .seats()
        .map(|id| SeatView {
            state: if layout.is_available(&id) {
                SeatState::Available
            } else {
                SeatState::Unavailable
            },
            id,
        })
        .collect();

    Json(serde_json::json!({
        "rows": layout.rows().map(String::from).collect::<Vec<_>>(),
        "columns": layout.columns(),
        "seats": seats,
        "count": layout.len(),
        "available": layout.available_count(),
        "unavailable": layout.unavailable_count()
    }))
}
