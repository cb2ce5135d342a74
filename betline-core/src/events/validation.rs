use crate::utils::money::round_cents;
use rust_decimal::Decimal;
use thiserror::Error;

/// Bad input. The messages are returned to API clients as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The deadline has already passed!")]
    DeadlinePassed,

    #[error("The coefficient must be greater than zero!")]
    NonPositiveCoefficient,

    #[error("There is no such event state!")]
    InvalidState,

    #[error("The bet amount must be greater than zero!")]
    NonPositiveAmount,

    #[error("The bet amount must not exceed {max}!")]
    AmountTooLarge { max: Decimal },

    #[error("Cannot generate {requested} events at once, the limit is {max}!")]
    TooManyEvents { requested: usize, max: usize },
}

/// A provided deadline must not lie before `now`.
pub fn validate_deadline(deadline: Option<i64>, now: i64) -> Result<Option<i64>, ValidationError> {
    match deadline {
        Some(deadline) if deadline < now => Err(ValidationError::DeadlinePassed),
        other => Ok(other),
    }
}

/// A provided coefficient is rounded to two places and must then be positive.
pub fn validate_coefficient(
    coefficient: Option<Decimal>,
) -> Result<Option<Decimal>, ValidationError> {
    match coefficient.map(round_cents) {
        Some(coefficient) if coefficient <= Decimal::ZERO => {
            Err(ValidationError::NonPositiveCoefficient)
        }
        other => Ok(other),
    }
}
