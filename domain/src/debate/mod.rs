//! Debate domain.
//!
//! - [`statement::Statement`] / [`transcript::Transcript`] — what has been said
//! - [`status::DebateStatus`] — the lifecycle state machine
//! - [`config::DebateConfig`] / [`config::StartDebateRequest`] — session configuration
//! - [`scheduler::TurnScheduler`] — who speaks, in which order
//! - [`session::DebateSession`] — the active session entity
//! - [`event::DebateEvent`] — events emitted while a debate runs

pub mod config;
pub mod event;
pub mod scheduler;
pub mod session;
pub mod statement;
pub mod status;
pub mod transcript;
