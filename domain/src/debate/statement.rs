//! Statement entity

use crate::participant::entities::{Participant, ParticipantId};
use crate::participant::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Round number reserved for the post-round recorder and adjudicator phases.
pub const CLOSING_ROUND: u32 = 0;

/// One participant's contribution to the debate (Entity)
///
/// A statement is created empty when a turn begins and receives its content
/// exactly once, through [`Statement::finalize`], when the turn resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    pub round: u32,
    pub participant_id: ParticipantId,
    pub participant_name: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_search_used: Option<bool>,
}

impl Statement {
    /// Open a statement for `participant` in `round` with no content yet.
    pub fn new(participant: &Participant, round: u32) -> Self {
        Self {
            round,
            participant_id: participant.id().clone(),
            participant_name: participant.name().to_string(),
            role: participant.role(),
            content: String::new(),
            timestamp: Utc::now(),
            web_search_used: None,
        }
    }

    /// Set the final content, consuming the open statement.
    pub fn finalize(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Record whether the external-lookup capability was exercised.
    pub fn with_web_search_used(mut self, used: bool) -> Self {
        self.web_search_used = Some(used);
        self
    }

    /// Whether this statement belongs to a debate round (not a closing phase)
    pub fn is_round_bound(&self) -> bool {
        self.round != CLOSING_ROUND
    }

    /// Render as a transcript line: `[name](round N): content`
    pub fn transcript_line(&self) -> String {
        format!(
            "[{}](round {}): {}",
            self.participant_name, self.round, self.content
        )
    }
}
