//! Debate events
//!
//! The closed set of events a running debate emits, in the order observers
//! receive them. Lifecycle events and the streaming pair (`StatementDelta`,
//! `StatementComplete`) travel on the same bus.

use super::session::DebateSnapshot;
use super::statement::Statement;
use super::status::DebateStatus;
use crate::participant::entities::{Participant, ParticipantId};
use crate::participant::role::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum DebateEvent {
    SessionStarted {
        session: Box<DebateSnapshot>,
    },
    SessionEnded {
        session: Box<DebateSnapshot>,
    },
    StatusChanged {
        status: DebateStatus,
    },
    RoundStarted {
        round: u32,
    },
    RoundEnded {
        round: u32,
    },
    MemberSpeaking {
        member: Participant,
        round: u32,
    },
    StatementAdded {
        statement: Statement,
    },
    /// A text fragment of a statement still being produced
    StatementDelta {
        participant_id: ParticipantId,
        participant_name: String,
        role: Role,
        round: u32,
        delta: String,
    },
    /// The finalized statement, closing the delta stream for its speaker
    StatementComplete {
        statement: Statement,
    },
}

impl DebateEvent {
    pub fn delta(statement: &Statement, delta: impl Into<String>) -> Self {
        DebateEvent::StatementDelta {
            participant_id: statement.participant_id.clone(),
            participant_name: statement.participant_name.clone(),
            role: statement.role,
            round: statement.round,
            delta: delta.into(),
        }
    }

    /// Wire name of the event (matches the serialized `type` tag)
    pub fn event_type(&self) -> &'static str {
        match self {
            DebateEvent::SessionStarted { .. } => "session_started",
            DebateEvent::SessionEnded { .. } => "session_ended",
            DebateEvent::StatusChanged { .. } => "status_changed",
            DebateEvent::RoundStarted { .. } => "round_started",
            DebateEvent::RoundEnded { .. } => "round_ended",
            DebateEvent::MemberSpeaking { .. } => "member_speaking",
            DebateEvent::StatementAdded { .. } => "statement_added",
            DebateEvent::StatementDelta { .. } => "statement_delta",
            DebateEvent::StatementComplete { .. } => "statement_complete",
        }
    }

    /// Whether this event belongs to the streaming pair rather than the lifecycle set
    pub fn is_streaming(&self) -> bool {
        matches!(
            self,
            DebateEvent::StatementDelta { .. } | DebateEvent::StatementComplete { .. }
        )
    }
}
