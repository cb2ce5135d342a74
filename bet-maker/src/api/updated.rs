use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use betline_core::sync::apply_event_updates;

use super::BetApiError;
use super::extractors::EventUpdates;
use crate::state::AppState;

/// `POST /updated`: apply a line-provider state notification.
///
/// The first entry's state is assigned to the bets of every event in the
/// batch. Replies with an empty JSON object.
pub(super) async fn receive_event_updates(
    state: State<AppState>,
    EventUpdates(batch): EventUpdates,
) -> Result<impl IntoResponse, BetApiError> {
    apply_event_updates(state.bets.as_ref(), &batch).await?;
    Ok((StatusCode::OK, Json(serde_json::json!({}))))
}
