//! Event API handlers.
//!
//! # Endpoints
//!
//! - `GET    /event/new`              – events open for betting
//! - `GET    /event/all`              – every event
//! - `GET    /event/{event_id}`       – one event
//! - `POST   /event/generate/{number}` – generate random events
//! - `POST   /event/create`           – create an event
//! - `PUT    /event/update`           – update an event, notifying on state change
//! - `DELETE /event/delete/all`       – delete every event
//! - `DELETE /event/delete/{event_id}` – delete one event

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use betline_core::events::{RegistryError, ValidationError};
use betline_core::sync::UpstreamError;
use betline_sdk::objects::ErrorDetail;

use crate::state::AppState;

mod create_event;
mod delete_events;
mod generate_events;
mod list_events;
mod update_event;


/// Build the Event API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/new", get(list_events::list_open_events))
        .route("/all", get(list_events::list_all_events))
        .route("/{event_id}", get(list_events::get_event))
        .route("/generate/{number}", post(generate_events::generate_events))
        .route("/create", post(create_event::create_event))
        .route("/update", put(update_event::update_event))
        .route("/delete/all", delete(delete_events::delete_all_events))
        .route("/delete/{event_id}", delete(delete_events::delete_event))
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in Event API handlers.
#[derive(Debug)]
enum EventApiError {
    /// The requested event does not exist.
    NotFound,
    /// A bulk operation found the registry empty.
    NoEvents,
    /// The request carried invalid values.
    Validation(ValidationError),
    /// The change was applied but bet-maker was not notified.
    BetMakerUnavailable(UpstreamError),
}

impl From<RegistryError> for EventApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(_) => EventApiError::NotFound,
            RegistryError::Empty => EventApiError::NoEvents,
            RegistryError::Validation(e) => EventApiError::Validation(e),
            RegistryError::Notification(e) => EventApiError::BetMakerUnavailable(e),
        }
    }
}

impl IntoResponse for EventApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, detail) = match self {
            EventApiError::NotFound => (StatusCode::NOT_FOUND, "Event not found!".to_string()),
            EventApiError::NoEvents => {
                (StatusCode::NOT_FOUND, "There are no events!".to_string())
            }
            EventApiError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            EventApiError::BetMakerUnavailable(e) => {
                tracing::error!(error = %e, "Event API: bet-maker notification failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "bet-maker is unavailable".to_string(),
                )
            }
        };
        (status, Json(ErrorDetail::new(detail))).into_response()
    }
}
