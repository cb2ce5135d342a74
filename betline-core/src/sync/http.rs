//! HTTP implementations of the sync seams.

use super::{EventNotifier, EventSource, UpstreamError};
use async_trait::async_trait;
use betline_sdk::client::{BetMakerClient, LineProviderClient};
use betline_sdk::objects::{Event, EventUpdateBatch};
use tracing::{debug, warn};

#[async_trait]
impl EventNotifier for BetMakerClient {
    async fn notify(&self, batch: &EventUpdateBatch) -> Result<(), UpstreamError> {
        debug!(event_ids = ?batch.event_ids(), "Sending event updates to bet-maker");
        self.send_event_updates(batch).await.map_err(|e| {
            warn!(error = %e, event_ids = ?batch.event_ids(), "Event update notification failed");
            UpstreamError::from(e)
        })
    }
}

#[async_trait]
impl EventSource for LineProviderClient {
    async fn open_events(&self) -> Result<Vec<Event>, UpstreamError> {
        LineProviderClient::open_events(self).await.map_err(|e| {
            warn!(error = %e, "Fetching open events from line-provider failed");
            UpstreamError::from(e)
        })
    }
}
