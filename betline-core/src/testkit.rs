//! In-memory doubles for the storage and notification seams.
//!
//! Enabled with the `testkit` feature; the server crates use these in their
//! router tests.

use crate::betting::{BetPlacement, BetRepository};
use crate::entities::BetState;
use crate::entities::bet::BetRecord;
use crate::events::EventRegistry;
use crate::sync::{EventNotifier, EventSource, UpstreamError, apply_event_updates};
use async_trait::async_trait;
use betline_sdk::objects::{Event, EventUpdateBatch};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Bet store backed by a vector; ids start at 1.
#[derive(Default)]
pub struct MemoryBetRepository {
    bets: Mutex<Vec<BetRecord>>,
}

#[async_trait]
impl BetRepository for MemoryBetRepository {
    async fn create(&self, placement: &BetPlacement) -> Result<BetRecord, sqlx::Error> {
        let mut bets = self.bets.lock().await;
        let record = BetRecord {
            bet_id: bets.len() as i64 + 1,
            event_id: placement.event_id,
            amount: placement.amount,
            state: BetState::New,
        };
        bets.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<BetRecord>, sqlx::Error> {
        Ok(self.bets.lock().await.clone())
    }

    async fn set_state_for_events(
        &self,
        event_ids: &[i64],
        state: BetState,
    ) -> Result<u64, sqlx::Error> {
        let mut bets = self.bets.lock().await;
        let mut updated = 0;
        for bet in bets.iter_mut().filter(|bet| event_ids.contains(&bet.event_id)) {
            bet.state = state;
            updated += 1;
        }
        Ok(updated)
    }
}

/// Notifier that keeps every batch it is asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    batches: Mutex<Vec<EventUpdateBatch>>,
    fail: bool,
}

impl RecordingNotifier {
    /// A notifier that records the batch and then reports the peer as down.
    pub fn failing() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub async fn batches(&self) -> Vec<EventUpdateBatch> {
        self.batches.lock().await.clone()
    }
}

#[async_trait]
impl EventNotifier for RecordingNotifier {
    async fn notify(&self, batch: &EventUpdateBatch) -> Result<(), UpstreamError> {
        self.batches.lock().await.push(batch.clone());
        if self.fail {
            Err(UpstreamError::Unreachable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Notifier that delivers straight into a bet store, as the bet-maker
/// webhook would.
pub struct LoopbackNotifier {
    bets: Arc<dyn BetRepository>,
}

impl LoopbackNotifier {
    pub fn new(bets: Arc<dyn BetRepository>) -> Self {
        Self { bets }
    }
}

#[async_trait]
impl EventNotifier for LoopbackNotifier {
    async fn notify(&self, batch: &EventUpdateBatch) -> Result<(), UpstreamError> {
        apply_event_updates(self.bets.as_ref(), batch)
            .await
            .map(|_| ())
            .map_err(|e| UpstreamError::Rejected {
                status: 500,
                body: e.to_string(),
            })
    }
}

/// Fixed list of open events, or a peer that cannot be reached.
pub struct StaticEventSource {
    events: Option<Vec<Event>>,
}

impl StaticEventSource {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: Some(events),
        }
    }

    pub fn unreachable() -> Self {
        Self { events: None }
    }
}

#[async_trait]
impl EventSource for StaticEventSource {
    async fn open_events(&self) -> Result<Vec<Event>, UpstreamError> {
        self.events
            .clone()
            .ok_or_else(|| UpstreamError::Unreachable("connection refused".to_string()))
    }
}

/// Reads the open events of an in-process registry.
#[async_trait]
impl EventSource for EventRegistry {
    async fn open_events(&self) -> Result<Vec<Event>, UpstreamError> {
        Ok(self.get_open().await)
    }
}
