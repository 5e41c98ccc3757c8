//! Domain layer for ai-committee
//!
//! Entities, value objects and pure rules of a turn-based committee debate.
//! Nothing in this crate performs I/O.
//!
//! # Core Concepts
//!
//! ## Roles
//!
//! Proponents argue in favor, contrarians must dissent. Both speak in every
//! round, proponents first. After the rounds a recorder writes a summary and
//! an adjudicator delivers the verdict.
//!
//! ## Visibility
//!
//! A debater sees every statement from earlier rounds plus what others have
//! said earlier in the current round, never its own same-round entry.

pub mod config;
pub mod core;
pub mod debate;
pub mod participant;
pub mod prompt;

pub use config::OutputFormat;
pub use core::{
    error::DomainError,
    model::{Backend, DEFAULT_MODEL, ModelSelector},
    topic::Topic,
};
pub use debate::{
    config::{DebateConfig, StartDebateRequest},
    event::DebateEvent,
    scheduler::{ClosingPhase, TurnScheduler},
    session::{DebateSession, DebateSnapshot},
    statement::{CLOSING_ROUND, Statement},
    status::DebateStatus,
    transcript::{Transcript, is_visible_to},
};
pub use participant::{
    entities::{Participant, ParticipantId, ParticipantSpec},
    role::Role,
};
pub use prompt::{DEFAULT_RESPONSE_LANGUAGE, DebatePromptTemplate, role_instruction};
