//! Application state shared across all request handlers.

use betline_core::events::EventRegistry;
use std::sync::Arc;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// The in-memory event registry.
    pub registry: Arc<EventRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<EventRegistry>) -> Self {
        Self { registry }
    }
}
