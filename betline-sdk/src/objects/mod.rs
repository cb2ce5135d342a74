pub mod bet;
pub mod event;
pub mod notification;

mod decimal;

pub use bet::{BetCreate, BetShow};
pub use event::{Event, EventCreate, EventPatch, EventState};
pub use notification::EventUpdateBatch;

use serde::{Deserialize, Serialize};

/// Body returned by both services on any client or server error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Result envelope returned by the delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    pub result: bool,
    pub message: String,
}

impl OperationResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            result: true,
            message: message.into(),
        }
    }
}

/// Body of the `GET /` index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMessage {
    pub message: String,
}

impl Default for IndexMessage {
    fn default() -> Self {
        Self {
            message: "This is index page!".to_string(),
        }
    }
}
