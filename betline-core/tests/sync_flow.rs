//! Cross-service flows run in-process: the event registry notifies straight
//! into an in-memory bet store, and bets are placed against the registry's
//! open events.

use betline_core::betting::{BetRepository, PlacementError, place_bet};
use betline_core::entities::BetState;
use betline_core::events::{EventRegistry, RegistryError};
use betline_core::testkit::{LoopbackNotifier, MemoryBetRepository};
use betline_sdk::objects::{BetCreate, EventPatch, EventState};
use rust_decimal::Decimal;
use std::sync::Arc;

struct Services {
    registry: Arc<EventRegistry>,
    bets: Arc<MemoryBetRepository>,
}

fn services() -> Services {
    let bets = Arc::new(MemoryBetRepository::default());
    let registry = Arc::new(EventRegistry::new(Arc::new(LoopbackNotifier::new(
        bets.clone(),
    ))));
    Services { registry, bets }
}

fn bet(event_id: i64, amount: i64) -> BetCreate {
    BetCreate {
        event_id,
        amount: Decimal::from(amount),
    }
}

fn finish(event_id: i64, state: EventState) -> EventPatch {
    EventPatch {
        event_id,
        state,
        coefficient: None,
        deadline: None,
    }
}

#[tokio::test]
async fn test_bet_on_generated_event_is_listed_as_new() {
    let s = services();
    let event = s.registry.generate(1).await.unwrap().remove(0);

    place_bet(s.registry.as_ref(), s.bets.as_ref(), bet(event.event_id, 10))
        .await
        .unwrap();

    let bets = s.bets.list().await.unwrap();
    assert_eq!(bets.len(), 1);
    assert_eq!(bets[0].event_id, event.event_id);
    assert_eq!(bets[0].amount, Decimal::new(1000, 2));
    assert_eq!(bets[0].state, BetState::New);
}

#[tokio::test]
async fn test_finishing_an_event_updates_its_bets() {
    let s = services();
    let event = s.registry.generate(1).await.unwrap().remove(0);
    place_bet(s.registry.as_ref(), s.bets.as_ref(), bet(event.event_id, 10))
        .await
        .unwrap();

    s.registry
        .update(finish(event.event_id, EventState::FinishedWin))
        .await
        .unwrap();

    let bets = s.bets.list().await.unwrap();
    assert_eq!(bets[0].state, BetState::FinishedWin);
}

#[tokio::test]
async fn test_closed_or_deleted_events_do_not_accept_bets() {
    let s = services();
    let events = s.registry.generate(2).await.unwrap();
    let (finished, deleted) = (events[0].event_id, events[1].event_id);

    s.registry
        .update(finish(finished, EventState::FinishedLose))
        .await
        .unwrap();
    s.registry.delete(deleted).await.unwrap();

    for event_id in [finished, deleted, 999] {
        let err = place_bet(s.registry.as_ref(), s.bets.as_ref(), bet(event_id, 5))
            .await
            .unwrap_err();
        assert!(matches!(err, PlacementError::EventNotFound(id) if id == event_id));
    }
    assert!(s.bets.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deleting_an_event_marks_its_bets_deleted() {
    let s = services();
    let events = s.registry.generate(2).await.unwrap();
    for event in &events {
        place_bet(s.registry.as_ref(), s.bets.as_ref(), bet(event.event_id, 1))
            .await
            .unwrap();
    }

    s.registry.delete(events[0].event_id).await.unwrap();

    let states: Vec<_> = s
        .bets
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.state)
        .collect();
    assert_eq!(states, vec![BetState::Deleted, BetState::New]);
}

#[tokio::test]
async fn test_delete_all_marks_every_bet_deleted() {
    let s = services();
    let events = s.registry.generate(3).await.unwrap();
    for event in &events {
        place_bet(s.registry.as_ref(), s.bets.as_ref(), bet(event.event_id, 2))
            .await
            .unwrap();
    }

    s.registry.delete_all().await.unwrap();

    assert!(
        s.bets
            .list()
            .await
            .unwrap()
            .iter()
            .all(|b| b.state == BetState::Deleted)
    );
}

#[tokio::test]
async fn test_delete_all_without_events_is_not_found() {
    let s = services();
    let err = s.registry.delete_all().await.unwrap_err();
    assert!(matches!(err, RegistryError::Empty));
}
