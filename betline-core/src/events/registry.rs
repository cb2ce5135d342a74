//! In-memory event store and its lifecycle state machine.
//!
//! The mutex is held across the notification call, so an
//! update/notify/remove sequence is never interleaved with another mutation.
//! While a notification is in flight every other call, reads included,
//! waits for it, up to the peer timeout. A failed notification does not roll
//! anything back.

use super::validation::{ValidationError, validate_coefficient, validate_deadline};
use crate::sync::{EventNotifier, UpstreamError};
use crate::utils::unix_now;
use betline_sdk::objects::{Event, EventCreate, EventPatch, EventState, EventUpdateBatch};
use rand::Rng;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

/// Largest batch accepted by [`EventRegistry::generate`].
pub const MAX_GENERATE_BATCH: usize = 1000;

/// Deadline assigned on creation when none is given, in seconds from now.
const DEFAULT_DEADLINE_SECS: i64 = 3600;

/// Generated coefficients are drawn from `[0.01, 10.00]`, in cents.
const MIN_COEFFICIENT_CENTS: i64 = 1;
const MAX_COEFFICIENT_CENTS: i64 = 1000;

/// Generated deadlines fall this many seconds in the future.
const MIN_DEADLINE_OFFSET_SECS: i64 = 30;
const MAX_DEADLINE_OFFSET_SECS: i64 = 600;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Event not found!")]
    NotFound(i64),

    #[error("There are no events!")]
    Empty,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The change was applied but the bet-maker could not be told about it.
    #[error("failed to notify bet-maker: {0}")]
    Notification(#[from] UpstreamError),
}

pub struct EventRegistry {
    events: Mutex<BTreeMap<i64, Event>>,
    notifier: Arc<dyn EventNotifier>,
}

impl EventRegistry {
    pub fn new(notifier: Arc<dyn EventNotifier>) -> Self {
        Self {
            events: Mutex::new(BTreeMap::new()),
            notifier,
        }
    }

    /// Create `count` random open events with consecutive ids above the
    /// current maximum.
    pub async fn generate(&self, count: usize) -> Result<Vec<Event>, RegistryError> {
        self.generate_at(count, unix_now()).await
    }

    pub async fn generate_at(&self, count: usize, now: i64) -> Result<Vec<Event>, RegistryError> {
        if count > MAX_GENERATE_BATCH {
            return Err(ValidationError::TooManyEvents {
                requested: count,
                max: MAX_GENERATE_BATCH,
            }
            .into());
        }

        let mut events = self.events.lock().await;
        let base_id = max_id(&events);
        let generated = random_events(base_id, count, now);
        for event in &generated {
            events.insert(event.event_id, event.clone());
        }

        info!(count, first_id = base_id + 1, "Generated events");
        Ok(generated)
    }

    /// Create one event, defaulting the coefficient to `1.00` and the
    /// deadline to an hour from now.
    pub async fn create(&self, request: EventCreate) -> Result<Event, RegistryError> {
        self.create_at(request, unix_now()).await
    }

    pub async fn create_at(&self, request: EventCreate, now: i64) -> Result<Event, RegistryError> {
        let coefficient = validate_coefficient(request.coefficient)?.unwrap_or(Decimal::new(100, 2));
        let deadline = validate_deadline(request.deadline, now)?.unwrap_or(now + DEFAULT_DEADLINE_SECS);

        let mut events = self.events.lock().await;
        let event = Event {
            coefficient: Some(coefficient),
            deadline: Some(deadline),
            event_id: max_id(&events) + 1,
            state: EventState::New,
        };
        events.insert(event.event_id, event.clone());

        info!(event_id = event.event_id, "Created event");
        Ok(event)
    }

    /// Merge a patch onto a stored event. Notifies the bet-maker with the
    /// updated event when the state changed.
    pub async fn update(&self, patch: EventPatch) -> Result<Event, RegistryError> {
        self.update_at(patch, unix_now()).await
    }

    pub async fn update_at(&self, patch: EventPatch, now: i64) -> Result<Event, RegistryError> {
        let coefficient = validate_coefficient(patch.coefficient)?;
        let deadline = match patch.deadline {
            Some(Some(deadline)) => Some(validate_deadline(Some(deadline), now)?),
            other => other,
        };

        let mut events = self.events.lock().await;
        let stored = events
            .get_mut(&patch.event_id)
            .ok_or(RegistryError::NotFound(patch.event_id))?;

        if !patch.state.is_assignable() {
            return Err(ValidationError::InvalidState.into());
        }

        let previous_state = stored.state;
        let is_state_changed = previous_state != patch.state;

        stored.state = patch.state;
        if let Some(coefficient) = coefficient {
            stored.coefficient = Some(coefficient);
        }
        if let Some(deadline) = deadline {
            stored.deadline = deadline;
        }
        let updated = stored.clone();

        if is_state_changed {
            info!(
                event_id = updated.event_id,
                from = %previous_state,
                to = %updated.state,
                "Event state changed"
            );
            self.notifier
                .notify(&EventUpdateBatch::single(updated.clone()))
                .await?;
        }

        Ok(updated)
    }

    /// Mark an event deleted, notify, then drop it.
    ///
    /// When the notification fails the event stays in the registry marked
    /// `Deleted`, so the delete can be retried.
    pub async fn delete(&self, event_id: i64) -> Result<(), RegistryError> {
        let mut events = self.events.lock().await;
        let event = events
            .get_mut(&event_id)
            .ok_or(RegistryError::NotFound(event_id))?;
        event.state = EventState::Deleted;
        let batch = EventUpdateBatch::single(event.clone());

        self.notifier.notify(&batch).await?;
        events.remove(&event_id);

        info!(event_id, "Deleted event");
        Ok(())
    }

    /// Mark every event deleted, send them all in one notification, then
    /// clear the registry.
    pub async fn delete_all(&self) -> Result<usize, RegistryError> {
        let mut events = self.events.lock().await;
        if events.is_empty() {
            return Err(RegistryError::Empty);
        }

        for event in events.values_mut() {
            event.state = EventState::Deleted;
        }
        let batch = EventUpdateBatch::new(events.values().cloned().collect());

        self.notifier.notify(&batch).await?;
        let count = events.len();
        events.clear();

        info!(count, "Deleted all events");
        Ok(count)
    }

    /// Events open for betting right now.
    pub async fn get_open(&self) -> Vec<Event> {
        self.get_open_at(unix_now()).await
    }

    pub async fn get_open_at(&self, now: i64) -> Vec<Event> {
        self.events
            .lock()
            .await
            .values()
            .filter(|event| event.is_open_at(now))
            .cloned()
            .collect()
    }

    pub async fn get_all(&self) -> Vec<Event> {
        self.events.lock().await.values().cloned().collect()
    }

    pub async fn get(&self, event_id: i64) -> Result<Event, RegistryError> {
        self.events
            .lock()
            .await
            .get(&event_id)
            .cloned()
            .ok_or(RegistryError::NotFound(event_id))
    }
}

fn max_id(events: &BTreeMap<i64, Event>) -> i64 {
    events.keys().next_back().copied().unwrap_or(0)
}

fn random_events(base_id: i64, count: usize, now: i64) -> Vec<Event> {
    let mut rng = rand::rng();
    (1..=count as i64)
        .map(|offset| Event {
            coefficient: Some(Decimal::new(
                rng.random_range(MIN_COEFFICIENT_CENTS..=MAX_COEFFICIENT_CENTS),
                2,
            )),
            deadline: Some(now + rng.random_range(MIN_DEADLINE_OFFSET_SECS..=MAX_DEADLINE_OFFSET_SECS)),
            event_id: base_id + offset,
            state: EventState::New,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::RecordingNotifier;
    use std::str::FromStr;

    const NOW: i64 = 1_700_000_000;

    fn registry() -> (EventRegistry, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        (EventRegistry::new(notifier.clone()), notifier)
    }

    fn patch(event_id: i64, state: EventState) -> EventPatch {
        EventPatch {
            event_id,
            state,
            coefficient: None,
            deadline: None,
        }
    }

    #[tokio::test]
    async fn test_generate_assigns_consecutive_ids() {
        let (registry, _) = registry();

        let first = registry.generate_at(3, NOW).await.unwrap();
        let ids: Vec<_> = first.iter().map(|e| e.event_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let second = registry.generate_at(2, NOW).await.unwrap();
        let ids: Vec<_> = second.iter().map(|e| e.event_id).collect();
        assert_eq!(ids, vec![4, 5]);

        for event in first.iter().chain(second.iter()) {
            assert_eq!(event.state, EventState::New);
            let coefficient = event.coefficient.unwrap();
            assert!(coefficient >= Decimal::new(1, 2) && coefficient <= Decimal::new(1000, 2));
            let deadline = event.deadline.unwrap();
            assert!((NOW + 30..=NOW + 600).contains(&deadline));
        }
        assert_eq!(registry.get_all().await.len(), 5);
    }

    #[tokio::test]
    async fn test_generate_zero_and_over_limit() {
        let (registry, _) = registry();
        assert!(registry.generate_at(0, NOW).await.unwrap().is_empty());

        let err = registry
            .generate_at(MAX_GENERATE_BATCH + 1, NOW)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation(ValidationError::TooManyEvents { .. })
        ));
    }

    #[tokio::test]
    async fn test_ids_restart_after_delete_all() {
        let (registry, _) = registry();
        registry.generate_at(4, NOW).await.unwrap();
        registry.delete_all().await.unwrap();

        let events = registry.generate_at(2, NOW).await.unwrap();
        let ids: Vec<_> = events.iter().map(|e| e.event_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_create_with_defaults() {
        let (registry, _) = registry();
        let event = registry.create_at(EventCreate::default(), NOW).await.unwrap();

        assert_eq!(event.event_id, 1);
        assert_eq!(event.coefficient, Some(Decimal::new(100, 2)));
        assert_eq!(event.deadline, Some(NOW + 3600));
        assert_eq!(event.state, EventState::New);
    }

    #[tokio::test]
    async fn test_create_rounds_coefficient_and_follows_max_id() {
        let (registry, _) = registry();
        registry.generate_at(2, NOW).await.unwrap();

        let event = registry
            .create_at(
                EventCreate {
                    coefficient: Some(Decimal::from_str("3.14159").unwrap()),
                    deadline: Some(NOW + 10),
                },
                NOW,
            )
            .await
            .unwrap();
        assert_eq!(event.event_id, 3);
        assert_eq!(event.coefficient, Some(Decimal::from_str("3.14").unwrap()));
        assert_eq!(event.deadline, Some(NOW + 10));
    }

    #[tokio::test]
    async fn test_create_rejects_past_deadline() {
        let (registry, _) = registry();
        let err = registry
            .create_at(
                EventCreate {
                    coefficient: None,
                    deadline: Some(NOW - 1),
                },
                NOW,
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation(ValidationError::DeadlinePassed)
        ));
        assert!(registry.get_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_coefficient() {
        let (registry, _) = registry();
        for coefficient in ["0", "-2", "0.001"] {
            let err = registry
                .create_at(
                    EventCreate {
                        coefficient: Some(Decimal::from_str(coefficient).unwrap()),
                        deadline: None,
                    },
                    NOW,
                )
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                RegistryError::Validation(ValidationError::NonPositiveCoefficient)
            ));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_keep_ids_unique_and_dense() {
        let registry = Arc::new(EventRegistry::new(Arc::new(RecordingNotifier::default())));
        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..40 {
            let registry = registry.clone();
            tasks.spawn(async move {
                if i % 2 == 0 {
                    registry.generate_at(5, NOW).await.map(|events| events.len())
                } else {
                    registry
                        .create_at(EventCreate::default(), NOW)
                        .await
                        .map(|_| 1)
                }
            });
        }

        let mut inserted = 0;
        while let Some(result) = tasks.join_next().await {
            inserted += result.unwrap().unwrap();
        }
        assert_eq!(inserted, 20 * 5 + 20);

        let ids: Vec<i64> = registry.get_all().await.iter().map(|e| e.event_id).collect();
        assert_eq!(ids, (1..=inserted as i64).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_get_open_filters_state_and_deadline() {
        let (registry, _) = registry();
        registry.generate_at(3, NOW).await.unwrap();
        registry
            .update_at(patch(2, EventState::FinishedWin), NOW)
            .await
            .unwrap();

        let open: Vec<_> = registry
            .get_open_at(NOW)
            .await
            .into_iter()
            .map(|e| e.event_id)
            .collect();
        assert_eq!(open, vec![1, 3]);

        // Generated deadlines are at most ten minutes out.
        assert!(registry.get_open_at(NOW + 601).await.is_empty());
        assert_eq!(registry.get_all().await.len(), 3);
    }

    #[tokio::test]
    async fn test_update_unknown_event() {
        let (registry, notifier) = registry();
        let err = registry
            .update_at(patch(42, EventState::FinishedWin), NOW)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(42)));
        assert!(notifier.batches().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_rejects_deleted_state() {
        let (registry, notifier) = registry();
        registry.generate_at(1, NOW).await.unwrap();

        let err = registry
            .update_at(patch(1, EventState::Deleted), NOW)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation(ValidationError::InvalidState)
        ));
        assert_eq!(registry.get(1).await.unwrap().state, EventState::New);
        assert!(notifier.batches().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_same_state_does_not_notify() {
        let (registry, notifier) = registry();
        registry.generate_at(1, NOW).await.unwrap();

        let updated = registry
            .update_at(
                EventPatch {
                    coefficient: Some(Decimal::from_str("4.2").unwrap()),
                    ..patch(1, EventState::New)
                },
                NOW,
            )
            .await
            .unwrap();
        assert_eq!(updated.coefficient, Some(Decimal::from_str("4.20").unwrap()));
        assert!(notifier.batches().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_state_change_notifies_full_event() {
        let (registry, notifier) = registry();
        let original = registry.generate_at(1, NOW).await.unwrap().remove(0);

        let updated = registry
            .update_at(
                EventPatch {
                    deadline: Some(Some(NOW + 5_000)),
                    ..patch(1, EventState::FinishedLose)
                },
                NOW,
            )
            .await
            .unwrap();

        assert_eq!(updated.coefficient, original.coefficient);
        assert_eq!(updated.deadline, Some(NOW + 5_000));
        assert_eq!(updated.state, EventState::FinishedLose);

        let batches = notifier.batches().await;
        assert_eq!(batches, vec![EventUpdateBatch::single(updated)]);
    }

    #[tokio::test]
    async fn test_update_validates_fields() {
        let (registry, _) = registry();
        registry.generate_at(1, NOW).await.unwrap();

        let err = registry
            .update_at(
                EventPatch {
                    deadline: Some(Some(NOW - 10)),
                    ..patch(1, EventState::FinishedWin)
                },
                NOW,
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation(ValidationError::DeadlinePassed)
        ));
        assert_eq!(registry.get(1).await.unwrap().state, EventState::New);
    }

    #[tokio::test]
    async fn test_update_with_null_deadline_closes_event() {
        let (registry, _) = registry();
        registry.generate_at(1, NOW).await.unwrap();

        let updated = registry
            .update_at(
                EventPatch {
                    deadline: Some(None),
                    ..patch(1, EventState::New)
                },
                NOW,
            )
            .await
            .unwrap();
        assert_eq!(updated.deadline, None);
        assert!(registry.get_open_at(NOW).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_change_when_notification_fails() {
        let notifier = Arc::new(RecordingNotifier::failing());
        let registry = EventRegistry::new(notifier.clone());
        registry.generate_at(1, NOW).await.unwrap();

        let err = registry
            .update_at(patch(1, EventState::FinishedWin), NOW)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Notification(_)));
        assert_eq!(registry.get(1).await.unwrap().state, EventState::FinishedWin);
    }

    #[tokio::test]
    async fn test_delete_notifies_and_removes() {
        let (registry, notifier) = registry();
        registry.generate_at(2, NOW).await.unwrap();

        registry.delete(1).await.unwrap();

        let remaining: Vec<_> = registry
            .get_all()
            .await
            .into_iter()
            .map(|e| e.event_id)
            .collect();
        assert_eq!(remaining, vec![2]);

        let batches = notifier.batches().await;
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].event_ids(), vec![1]);
        assert_eq!(batches[0].first_state(), Some(EventState::Deleted));
        assert!(matches!(
            registry.get(1).await,
            Err(RegistryError::NotFound(1))
        ));
    }

    #[tokio::test]
    async fn test_delete_unknown_event() {
        let (registry, notifier) = registry();
        assert!(matches!(
            registry.delete(9).await,
            Err(RegistryError::NotFound(9))
        ));
        assert!(notifier.batches().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_event_marked_deleted() {
        let notifier = Arc::new(RecordingNotifier::failing());
        let registry = EventRegistry::new(notifier);
        registry.generate_at(1, NOW).await.unwrap();

        assert!(matches!(
            registry.delete(1).await,
            Err(RegistryError::Notification(_))
        ));
        assert_eq!(registry.get(1).await.unwrap().state, EventState::Deleted);
        assert!(registry.get_open_at(NOW).await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_all_sends_every_event_in_one_batch() {
        let (registry, notifier) = registry();
        registry.generate_at(3, NOW).await.unwrap();

        assert_eq!(registry.delete_all().await.unwrap(), 3);
        assert!(registry.get_all().await.is_empty());

        let batches = notifier.batches().await;
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].event_ids(), vec![1, 2, 3]);
        assert!(
            batches[0]
                .events()
                .iter()
                .all(|e| e.state == EventState::Deleted)
        );
    }

    #[tokio::test]
    async fn test_delete_all_on_empty_registry() {
        let (registry, notifier) = registry();
        let err = registry.delete_all().await.unwrap_err();
        assert!(matches!(err, RegistryError::Empty));
        assert_eq!(err.to_string(), "There are no events!");
        assert!(notifier.batches().await.is_empty());
    }
}
