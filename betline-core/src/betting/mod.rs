//! Bet placement and the bet store seam.

use crate::entities::BetState;
use crate::entities::bet::{BetRecord, InsertBet, ListBets, UpdateBetStateByEventIds};
use crate::events::ValidationError;
use crate::framework::DatabaseProcessor;
use crate::sync::{EventSource, UpstreamError};
use crate::utils::money::round_cents;
use async_trait::async_trait;
use betline_sdk::objects::BetCreate;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

/// Durable storage for bets.
#[async_trait]
pub trait BetRepository: Send + Sync {
    async fn create(&self, placement: &BetPlacement) -> Result<BetRecord, sqlx::Error>;

    async fn list(&self) -> Result<Vec<BetRecord>, sqlx::Error>;

    /// Assign `state` to every bet referencing one of `event_ids`, atomically.
    async fn set_state_for_events(
        &self,
        event_ids: &[i64],
        state: BetState,
    ) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl BetRepository for DatabaseProcessor {
    async fn create(&self, placement: &BetPlacement) -> Result<BetRecord, sqlx::Error> {
        self.process(InsertBet {
            event_id: placement.event_id,
            amount: placement.amount,
        })
        .await
    }

    async fn list(&self) -> Result<Vec<BetRecord>, sqlx::Error> {
        self.process(ListBets).await
    }

    async fn set_state_for_events(
        &self,
        event_ids: &[i64],
        state: BetState,
    ) -> Result<u64, sqlx::Error> {
        self.process(UpdateBetStateByEventIds {
            event_ids: event_ids.to_vec(),
            state,
        })
        .await
    }
}

/// Largest amount the `bets.amount` column (`NUMERIC(12, 2)`) holds.
// 999_999_999_999 (0xE8_D4A5_0FFF) at scale 2; `Decimal::new` is not const.
pub const MAX_BET_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, 2);

/// A validated bet request: amount rounded to cents, then positive and
/// within [`MAX_BET_AMOUNT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetPlacement {
    pub event_id: i64,
    pub amount: Decimal,
}

impl TryFrom<BetCreate> for BetPlacement {
    type Error = ValidationError;

    fn try_from(request: BetCreate) -> Result<Self, Self::Error> {
        let amount = round_cents(request.amount);
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        if amount > MAX_BET_AMOUNT {
            return Err(ValidationError::AmountTooLarge {
                max: MAX_BET_AMOUNT,
            });
        }
        Ok(Self {
            event_id: request.event_id,
            amount,
        })
    }
}

#[derive(Debug, Error)]
pub enum PlacementError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The event is unknown, closed or deleted.
    #[error("event {0} is not open for betting")]
    EventNotFound(i64),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Validate a bet against the live open events and persist it.
///
/// The open events are fetched on every call; nothing is cached.
pub async fn place_bet(
    events: &dyn EventSource,
    bets: &dyn BetRepository,
    request: BetCreate,
) -> Result<BetRecord, PlacementError> {
    let placement = BetPlacement::try_from(request)?;

    let open_events = events.open_events().await?;
    if !open_events
        .iter()
        .any(|event| event.event_id == placement.event_id)
    {
        return Err(PlacementError::EventNotFound(placement.event_id));
    }

    let record = bets.create(&placement).await?;
    info!(
        bet_id = record.bet_id,
        event_id = record.event_id,
        amount = %record.amount,
        "Bet placed"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{MemoryBetRepository, StaticEventSource};
    use betline_sdk::objects::{Event, EventState};
    use std::str::FromStr;

    fn open_event(event_id: i64) -> Event {
        Event {
            coefficient: Some(Decimal::new(250, 2)),
            deadline: Some(i64::MAX),
            event_id,
            state: EventState::New,
        }
    }

    fn request(event_id: i64, amount: &str) -> BetCreate {
        BetCreate {
            event_id,
            amount: Decimal::from_str(amount).unwrap(),
        }
    }

    #[test]
    fn test_placement_rejects_non_positive_amount() {
        assert_eq!(
            BetPlacement::try_from(request(1, "0")),
            Err(ValidationError::NonPositiveAmount)
        );
        assert_eq!(
            BetPlacement::try_from(request(1, "-3.50")),
            Err(ValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_placement_rejects_amount_rounding_to_zero() {
        assert_eq!(
            BetPlacement::try_from(request(1, "0.004")),
            Err(ValidationError::NonPositiveAmount)
        );
        let placement = BetPlacement::try_from(request(1, "0.005")).unwrap();
        assert_eq!(placement.amount, Decimal::from_str("0.01").unwrap());
    }

    #[test]
    fn test_placement_rejects_amount_above_column_range() {
        let placement = BetPlacement::try_from(request(1, "9999999999.99")).unwrap();
        assert_eq!(placement.amount, MAX_BET_AMOUNT);
        assert_eq!(
            BetPlacement::try_from(request(1, "10000000000")),
            Err(ValidationError::AmountTooLarge {
                max: MAX_BET_AMOUNT
            })
        );
        // Rounds up past the limit.
        assert!(BetPlacement::try_from(request(1, "9999999999.995")).is_err());
    }

    #[test]
    fn test_placement_rounds_amount() {
        let placement = BetPlacement::try_from(request(1, "1.005")).unwrap();
        assert_eq!(placement.amount, Decimal::from_str("1.01").unwrap());
    }

    #[tokio::test]
    async fn test_place_bet_on_open_event() {
        let events = StaticEventSource::new(vec![open_event(3)]);
        let bets = MemoryBetRepository::default();

        let record = place_bet(&events, &bets, request(3, "10")).await.unwrap();
        assert_eq!(record.event_id, 3);
        assert_eq!(record.amount, Decimal::from(10));
        assert_eq!(record.state, BetState::New);
        assert_eq!(bets.list().await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn test_place_bet_on_unknown_event() {
        let events = StaticEventSource::new(vec![open_event(3)]);
        let bets = MemoryBetRepository::default();

        let err = place_bet(&events, &bets, request(4, "10")).await.unwrap_err();
        assert!(matches!(err, PlacementError::EventNotFound(4)));
        assert!(bets.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_place_bet_without_open_events() {
        let events = StaticEventSource::new(vec![]);
        let bets = MemoryBetRepository::default();

        let err = place_bet(&events, &bets, request(1, "10")).await.unwrap_err();
        assert!(matches!(err, PlacementError::EventNotFound(1)));
    }

    #[tokio::test]
    async fn test_amount_is_checked_before_fetching_events() {
        let events = StaticEventSource::unreachable();
        let bets = MemoryBetRepository::default();

        let err = place_bet(&events, &bets, request(1, "0")).await.unwrap_err();
        assert!(matches!(
            err,
            PlacementError::Validation(ValidationError::NonPositiveAmount)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_line_provider() {
        let events = StaticEventSource::unreachable();
        let bets = MemoryBetRepository::default();

        let err = place_bet(&events, &bets, request(1, "5")).await.unwrap_err();
        assert!(matches!(err, PlacementError::Upstream(_)));
    }
}
