use crate::betting::BetRepository;
use crate::entities::BetState;
use betline_sdk::objects::EventUpdateBatch;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("notification carries no events")]
    EmptyBatch,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Apply a received batch to the bet store.
///
/// The state of the *first* entry is assigned to the bets of *every* event
/// in the batch. Returns the number of bets updated.
pub async fn apply_event_updates(
    bets: &dyn BetRepository,
    batch: &EventUpdateBatch,
) -> Result<u64, SyncError> {
    let Some(first_state) = batch.first_state() else {
        return Err(SyncError::EmptyBatch);
    };

    let event_ids = batch.event_ids();
    if batch.has_mixed_states() {
        warn!(
            event_ids = ?event_ids,
            applied_state = %first_state,
            "Notification carries mixed states; applying the first entry's state to all"
        );
    }

    let updated = bets
        .set_state_for_events(&event_ids, BetState::from(first_state))
        .await?;

    info!(
        event_ids = ?event_ids,
        state = %first_state,
        bets_updated = updated,
        "Applied event state notification"
    );
    Ok(updated)
}
