use axum::{Json, extract::State, response::IntoResponse};
use betline_core::betting;
use betline_core::entities::bet::BetRecord;
use betline_sdk::objects::{BetCreate, BetShow};

use super::BetApiError;
use crate::state::AppState;

fn to_response(record: BetRecord) -> BetShow {
    BetShow {
        bet_id: record.bet_id,
        event_id: record.event_id,
        amount: record.amount,
        state: record.state.into(),
    }
}

/// `POST /bet`: place a bet on an event that is currently open.
pub(super) async fn place_bet(
    state: State<AppState>,
    Json(body): Json<BetCreate>,
) -> Result<impl IntoResponse, BetApiError> {
    let record = betting::place_bet(state.events.as_ref(), state.bets.as_ref(), body).await?;
    Ok(Json(to_response(record)))
}

/// `GET /bets`: every stored bet, oldest first.
pub(super) async fn list_bets(state: State<AppState>) -> Result<impl IntoResponse, BetApiError> {
    let records = state.bets.list().await?;
    Ok(Json(
        records.into_iter().map(to_response).collect::<Vec<_>>(),
    ))
}
