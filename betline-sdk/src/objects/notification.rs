//! Event state change notification pushed from line-provider to bet-maker.
//!
//! The JSON form is an object keyed by the stringified event id:
//!
//! ```text
//! {"7": {"coefficient": 1.5, "deadline": 1692749643, "event_id": 7, "state": 2}}
//! ```
//!
//! On the wire that object is itself encoded as a JSON string, so the HTTP
//! body is `"{\"7\": {...}}"`. Entry order is kept in both directions.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Event, EventState};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventUpdateBatch {
    events: Vec<Event>,
}

impl EventUpdateBatch {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn single(event: Event) -> Self {
        Self {
            events: vec![event],
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn event_ids(&self) -> Vec<i64> {
        self.events.iter().map(|event| event.event_id).collect()
    }

    /// State of the first entry, in wire order.
    pub fn first_state(&self) -> Option<EventState> {
        self.events.first().map(|event| event.state)
    }

    /// Whether the entries disagree on their state.
    pub fn has_mixed_states(&self) -> bool {
        match self.first_state() {
            Some(first) => self.events.iter().any(|event| event.state != first),
            None => false,
        }
    }

    /// Encode as the HTTP body: a JSON string holding the JSON object.
    pub fn to_wire_body(&self) -> Result<String, serde_json::Error> {
        let inner = serde_json::to_string(self)?;
        serde_json::to_string(&inner)
    }

    /// Decode an HTTP body, accepting both the string-encoded object and the
    /// plain object.
    pub fn from_wire_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<String>(body) {
            Ok(inner) => serde_json::from_str(&inner),
            Err(_) => serde_json::from_slice(body),
        }
    }
}

impl Serialize for EventUpdateBatch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(
            self.events
                .iter()
                .map(|event| (event.event_id.to_string(), event)),
        )
    }
}

impl<'de> Deserialize<'de> for EventUpdateBatch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BatchVisitor;

        impl<'de> Visitor<'de> for BatchVisitor {
            type Value = EventUpdateBatch;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of event id to event")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut events = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((_, event)) = map.next_entry::<String, Event>()? {
                    events.push(event);
                }
                Ok(EventUpdateBatch { events })
            }
        }

        deserializer.deserialize_map(BatchVisitor)
    }
}
