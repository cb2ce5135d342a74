//! Cross-service event state synchronization.
//!
//! # Flow
//!
//! 1. line-provider changes an event's state and pushes an
//!    `EventUpdateBatch` through an [`EventNotifier`].
//! 2. bet-maker receives the batch and runs [`apply_event_updates`] against
//!    its bet store.
//! 3. When a bet is placed, bet-maker reads the open events through an
//!    [`EventSource`].
//!
//! Delivery is a single attempt with no acknowledgement beyond the HTTP
//! status.

mod http;
mod receiver;

pub use receiver::{SyncError, apply_event_updates};

use async_trait::async_trait;
use betline_sdk::client::ClientError;
use betline_sdk::objects::{Event, EventUpdateBatch};
use thiserror::Error;

/// The peer service could not be reached or refused the call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection failure or timeout.
    #[error("peer unreachable: {0}")]
    Unreachable(String),

    /// The peer answered with a non-2xx status.
    #[error("peer rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The peer's reply, or our request, could not be encoded.
    #[error("peer payload error: {0}")]
    Payload(String),
}

impl From<ClientError> for UpstreamError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) => UpstreamError::Unreachable(e.to_string()),
            ClientError::Api { status, body } => UpstreamError::Rejected {
                status: status.as_u16(),
                body,
            },
            ClientError::Json(e) => UpstreamError::Payload(e.to_string()),
            ClientError::Url(e) => UpstreamError::Payload(e.to_string()),
        }
    }
}

/// Outbound side of the notification protocol.
///
/// The event registry only knows that someone consumes state changes by
/// event id.
#[async_trait]
pub trait EventNotifier: Send + Sync {
    async fn notify(&self, batch: &EventUpdateBatch) -> Result<(), UpstreamError>;
}

/// Live view of the events that currently accept bets.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn open_events(&self) -> Result<Vec<Event>, UpstreamError>;
}
