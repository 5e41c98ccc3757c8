//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod debate_controller;
pub mod event_bus;
pub mod participant_sessions;

#[cfg(test)]
pub(crate) mod testing;
