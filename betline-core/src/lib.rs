#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![forbid(unsafe_code)]

pub mod betting;
pub mod config;
pub mod entities;
pub mod events;
pub mod framework;
pub mod sync;
pub mod utils;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
