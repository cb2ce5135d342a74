pub mod bet;

use betline_sdk::objects::EventState as SdkEventState;

/// Bet state for database operations.
///
/// Stored as the `SMALLINT` code of the mirrored event state. For API/DTO
/// use, see `betline_sdk::objects::EventState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[repr(i16)]
pub enum BetState {
    Deleted = 0,
    New = 1,
    FinishedWin = 2,
    FinishedLose = 3,
}

impl From<BetState> for SdkEventState {
    fn from(value: BetState) -> Self {
        match value {
            BetState::Deleted => SdkEventState::Deleted,
            BetState::New => SdkEventState::New,
            BetState::FinishedWin => SdkEventState::FinishedWin,
            BetState::FinishedLose => SdkEventState::FinishedLose,
        }
    }
}

impl From<SdkEventState> for BetState {
    fn from(value: SdkEventState) -> Self {
        match value {
            SdkEventState::Deleted => BetState::Deleted,
            SdkEventState::New => BetState::New,
            SdkEventState::FinishedWin => BetState::FinishedWin,
            SdkEventState::FinishedLose => BetState::FinishedLose,
        }
    }
}
