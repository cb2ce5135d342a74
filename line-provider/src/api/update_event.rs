use axum::{Json, extract::State, response::IntoResponse};
use betline_sdk::objects::EventPatch;

use super::EventApiError;
use crate::state::AppState;

/// `PUT /event/update`: update an event.
///
/// When the state changes, bet-maker is notified before the response is
/// sent. A failed notification yields 502 but the update stays applied.
pub(super) async fn update_event(
    state: State<AppState>,
    Json(body): Json<EventPatch>,
) -> Result<impl IntoResponse, EventApiError> {
    let event = state.registry.update(body).await?;
    Ok(Json(event))
}
