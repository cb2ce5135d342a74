//! Application state shared across all request handlers.

use betline_core::betting::BetRepository;
use betline_core::sync::EventSource;
use std::sync::Arc;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// Durable bet store.
    pub bets: Arc<dyn BetRepository>,
    /// The line-provider, queried for open events on every bet.
    pub events: Arc<dyn EventSource>,
}

impl AppState {
    pub fn new(bets: Arc<dyn BetRepository>, events: Arc<dyn EventSource>) -> Self {
        Self { bets, events }
    }
}
