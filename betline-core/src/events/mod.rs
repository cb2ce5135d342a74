//! The event registry owned by the line-provider service.
//!
//! Events live only in process memory. Every mutation goes through
//! [`EventRegistry`], which holds the collection behind one lock and pushes
//! state changes to the bet-maker through an [`EventNotifier`].
//!
//! [`EventNotifier`]: crate::sync::EventNotifier

pub mod registry;
pub mod validation;

pub use registry::{EventRegistry, MAX_GENERATE_BATCH, RegistryError};
pub use validation::ValidationError;
