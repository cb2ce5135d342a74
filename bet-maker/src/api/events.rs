use axum::{Json, extract::State, response::IntoResponse};

use super::BetApiError;
use crate::state::AppState;

/// `GET /events`: the line-provider's open events, passed through as-is.
pub(super) async fn list_open_events(
    state: State<AppState>,
) -> Result<impl IntoResponse, BetApiError> {
    let events = state.events.open_events().await?;
    Ok(Json(events))
}
