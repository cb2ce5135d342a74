use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use super::EventApiError;
use crate::state::AppState;

/// `GET /event/new`: events that currently accept bets.
pub(super) async fn list_open_events(state: State<AppState>) -> impl IntoResponse {
    Json(state.registry.get_open().await)
}

/// `GET /event/all`: every event, open or not.
pub(super) async fn list_all_events(state: State<AppState>) -> impl IntoResponse {
    Json(state.registry.get_all().await)
}

/// `GET /event/{event_id}`: one event.
pub(super) async fn get_event(
    state: State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<impl IntoResponse, EventApiError> {
    let event = state.registry.get(event_id).await?;
    Ok(Json(event))
}
