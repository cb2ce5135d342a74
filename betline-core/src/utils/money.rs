use rust_decimal::{Decimal, RoundingStrategy};

/// Round to whole cents, halves away from zero (`1.005` becomes `1.01`).
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
