//! Event objects owned by the line-provider service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::decimal::as_float_option;

/// Lifecycle state of an event.
///
/// Travels on the wire as its integer code. Bets in the bet-maker service
/// mirror these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventState {
    Deleted = 0,
    New = 1,
    FinishedWin = 2,
    FinishedLose = 3,
}

impl EventState {
    pub fn code(self) -> i16 {
        self as i16
    }

    /// Whether this state may be set through an event update.
    pub fn is_assignable(self) -> bool {
        !matches!(self, EventState::Deleted)
    }
}

/// Returned when an integer is not a known state code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown event state code {0}")]
pub struct UnknownEventState(pub i64);

impl TryFrom<i64> for EventState {
    type Error = UnknownEventState;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EventState::Deleted),
            1 => Ok(EventState::New),
            2 => Ok(EventState::FinishedWin),
            3 => Ok(EventState::FinishedLose),
            other => Err(UnknownEventState(other)),
        }
    }
}

impl std::fmt::Display for EventState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventState::Deleted => write!(f, "deleted"),
            EventState::New => write!(f, "new"),
            EventState::FinishedWin => write!(f, "finished_win"),
            EventState::FinishedLose => write!(f, "finished_lose"),
        }
    }
}

impl Serialize for EventState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i16(self.code())
    }
}

impl<'de> Deserialize<'de> for EventState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        EventState::try_from(value).map_err(|_| {
            serde::de::Error::invalid_value(
                serde::de::Unexpected::Signed(value),
                &"one of 0, 1, 2, 3",
            )
        })
    }
}

/// A bettable proposition as stored by the event registry.
///
/// Field order matches the serialized representation sent in notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, serialize_with = "as_float_option")]
    pub coefficient: Option<Decimal>,
    /// Unix timestamp after which no more bets are accepted.
    #[serde(default)]
    pub deadline: Option<i64>,
    pub event_id: i64,
    pub state: EventState,
}

impl Event {
    /// An event is open for betting while it is `New` and its deadline lies
    /// strictly in the future.
    pub fn is_open_at(&self, now: i64) -> bool {
        self.state == EventState::New && self.deadline.is_some_and(|deadline| deadline > now)
    }
}

/// Request body of `POST /event/create`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCreate {
    #[serde(default, serialize_with = "as_float_option")]
    pub coefficient: Option<Decimal>,
    #[serde(default)]
    pub deadline: Option<i64>,
}

/// Request body of `PUT /event/update`.
///
/// `coefficient` is merged onto the stored event only when present. For
/// `deadline`, an absent key keeps the stored value and an explicit `null`
/// clears it, which closes the event. `state` is always applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPatch {
    pub event_id: i64,
    pub state: EventState,
    #[serde(default, serialize_with = "as_float_option")]
    pub coefficient: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<Option<i64>>,
}

/// Maps a present key to `Some`, keeping `null` as `Some(None)`. Absent keys
/// fall back to `None` through `#[serde(default)]`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
