//! Custom Axum extractors.
//!
//! Provides `EventUpdates`, which decodes the body of a line-provider
//! notification. The body is normally a JSON string that itself holds the
//! JSON object; a bare object is accepted too.

use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use betline_sdk::objects::{ErrorDetail, EventUpdateBatch};

/// Largest notification body read, in bytes.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// A decoded event state notification.
pub struct EventUpdates(pub EventUpdateBatch);

/// Errors returned by the [`EventUpdates`] extractor.
#[derive(Debug, thiserror::Error)]
pub enum EventUpdatesError {
    #[error("failed to read request body")]
    BodyReadError,
    #[error("invalid notification body: {0}")]
    JsonError(serde_json::Error),
}

impl IntoResponse for EventUpdatesError {
    fn into_response(self) -> Response {
        let status = match self {
            EventUpdatesError::BodyReadError => StatusCode::BAD_REQUEST,
            EventUpdatesError::JsonError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        (status, Json(ErrorDetail::new(self.to_string()))).into_response()
    }
}

impl<S: Send + Sync> FromRequest<S> for EventUpdates {
    type Rejection = EventUpdatesError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let body_bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|_| EventUpdatesError::BodyReadError)?;

        EventUpdateBatch::from_wire_body(&body_bytes)
            .map(EventUpdates)
            .map_err(EventUpdatesError::JsonError)
    }
}
