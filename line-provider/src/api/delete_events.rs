use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use betline_sdk::objects::OperationResult;

use super::EventApiError;
use crate::state::AppState;

/// `DELETE /event/delete/all`: delete every event, notifying bet-maker
/// with one batch.
pub(super) async fn delete_all_events(
    state: State<AppState>,
) -> Result<impl IntoResponse, EventApiError> {
    state.registry.delete_all().await?;
    Ok(Json(OperationResult::success(
        "All events were successfully deleted!",
    )))
}

/// `DELETE /event/delete/{event_id}`: delete one event.
pub(super) async fn delete_event(
    state: State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<impl IntoResponse, EventApiError> {
    state.registry.delete(event_id).await?;
    Ok(Json(OperationResult::success(format!(
        "Event {event_id} was successfully deleted!"
    ))))
}
