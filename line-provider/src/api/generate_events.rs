use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use super::EventApiError;
use crate::state::AppState;

/// `POST /event/generate/{number}`: create `number` random open events.
pub(super) async fn generate_events(
    state: State<AppState>,
    Path(number): Path<usize>,
) -> Result<impl IntoResponse, EventApiError> {
    let events = state.registry.generate(number).await?;
    Ok(Json(events))
}
