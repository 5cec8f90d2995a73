//! Event registration wizard: bootstrap and console front end.
//!
//! Domain rules live in `rw-core`, orchestration in `rw-app` and the record
//! store / mail adapters in `rw-infra`. This crate assembles them.

pub mod bootstrap;
pub mod console;
