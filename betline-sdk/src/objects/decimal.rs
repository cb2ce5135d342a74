//! Serializers that write decimals as JSON numbers.
//!
//! Deserialization stays on the `rust_decimal` default, which accepts both
//! numbers and numeric strings.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serializer;

pub(crate) fn as_float<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value.to_f64() {
        Some(float) => serializer.serialize_f64(float),
        None => Err(serde::ser::Error::custom(format!(
            "decimal {value} is not representable as a float"
        ))),
    }
}

pub(crate) fn as_float_option<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(decimal) => as_float(decimal, serializer),
        None => serializer.serialize_none(),
    }
}
