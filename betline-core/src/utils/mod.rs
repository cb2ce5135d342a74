pub mod backoff;
pub mod money;
pub mod shutdown;

/// Current unix timestamp in whole seconds.
pub fn unix_now() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}
