//! Bet objects owned by the bet-maker service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EventState;
use super::decimal::as_float;

/// Request body of `POST /bet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetCreate {
    pub event_id: i64,
    #[serde(serialize_with = "as_float")]
    pub amount: Decimal,
}

/// A stored bet as returned by the bet-maker API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetShow {
    pub bet_id: i64,
    pub event_id: i64,
    #[serde(serialize_with = "as_float")]
    pub amount: Decimal,
    pub state: EventState,
}
