//! Bet-maker API handlers.
//!
//! # Endpoints
//!
//! - `GET  /events`  – open events, proxied from the line-provider
//! - `POST /updated` – event state notification from the line-provider
//! - `POST /bet`     – place a bet on an open event
//! - `GET  /bets`    – every stored bet

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use betline_core::betting::PlacementError;
use betline_core::events::ValidationError;
use betline_core::sync::{SyncError, UpstreamError};
use betline_sdk::objects::ErrorDetail;

use crate::state::AppState;

mod bets;
mod events;
pub mod extractors;
mod updated;


/// Build the bet-maker API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(events::list_open_events))
        .route("/updated", post(updated::receive_event_updates))
        .route("/bet", post(bets::place_bet))
        .route("/bets", get(bets::list_bets))
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in bet-maker API handlers.
#[derive(Debug)]
enum BetApiError {
    /// The request carried invalid values.
    Validation(ValidationError),
    /// The event is unknown to the line-provider or not open.
    EventNotFound,
    /// A notification without entries.
    EmptyNotification,
    /// The line-provider could not be queried.
    LineProviderUnavailable(UpstreamError),
    /// Database error.
    Database(sqlx::Error),
}

impl From<PlacementError> for BetApiError {
    fn from(err: PlacementError) -> Self {
        match err {
            PlacementError::Validation(e) => BetApiError::Validation(e),
            PlacementError::EventNotFound(_) => BetApiError::EventNotFound,
            PlacementError::Upstream(e) => BetApiError::LineProviderUnavailable(e),
            PlacementError::Database(e) => BetApiError::Database(e),
        }
    }
}

impl From<SyncError> for BetApiError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::EmptyBatch => BetApiError::EmptyNotification,
            SyncError::Database(e) => BetApiError::Database(e),
        }
    }
}

impl From<UpstreamError> for BetApiError {
    fn from(err: UpstreamError) -> Self {
        BetApiError::LineProviderUnavailable(err)
    }
}

impl From<sqlx::Error> for BetApiError {
    fn from(err: sqlx::Error) -> Self {
        BetApiError::Database(err)
    }
}

impl IntoResponse for BetApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, detail) = match self {
            BetApiError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            BetApiError::EventNotFound => {
                (StatusCode::NOT_FOUND, "Event not found!".to_string())
            }
            BetApiError::EmptyNotification => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "The notification carries no events!".to_string(),
            ),
            BetApiError::LineProviderUnavailable(e) => {
                tracing::error!(error = %e, "Bet API: line-provider request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "line-provider is unavailable".to_string(),
                )
            }
            BetApiError::Database(e) => {
                tracing::error!(error = %e, "Bet API: database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorDetail::new(detail))).into_response()
    }
}
