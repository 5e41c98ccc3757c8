//! Debate participants.
//!
//! - [`role::Role`] — closed set of debate roles
//! - [`entities::Participant`] — a roster entry with its assigned identity
//! - [`entities::ParticipantSpec`] — caller-supplied roster data, before ids are assigned

pub mod entities;
pub mod role;
