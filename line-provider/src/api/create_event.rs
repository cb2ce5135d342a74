use axum::{Json, extract::State, response::IntoResponse};
use betline_sdk::objects::EventCreate;

use super::EventApiError;
use crate::state::AppState;

/// `POST /event/create`: create one event.
///
/// Missing fields default to a coefficient of `1.00` and a deadline one
/// hour from now.
pub(super) async fn create_event(
    state: State<AppState>,
    Json(body): Json<EventCreate>,
) -> Result<impl IntoResponse, EventApiError> {
    let event = state.registry.create(body).await?;
    Ok(Json(event))
}
