//! Debate status state machine

use serde::{Deserialize, Serialize};

/// Lifecycle status of a debate session
///
/// The sequence is fixed: `idle → debating → (secretary_summarizing)? →
/// (arbiter_concluding)? → completed`. The two middle states are skipped when
/// the roster lacks the corresponding role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebateStatus {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "debating")]
    Debating,
    #[serde(rename = "secretary_summarizing")]
    Summarizing,
    #[serde(rename = "arbiter_concluding")]
    Concluding,
    #[serde(rename = "completed")]
    Completed,
}

impl DebateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebateStatus::Idle => "idle",
            DebateStatus::Debating => "debating",
            DebateStatus::Summarizing => "secretary_summarizing",
            DebateStatus::Concluding => "arbiter_concluding",
            DebateStatus::Completed => "completed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DebateStatus::Idle => "Waiting to start",
            DebateStatus::Debating => "Debating",
            DebateStatus::Summarizing => "Recorder summarizing",
            DebateStatus::Concluding => "Adjudicator concluding",
            DebateStatus::Completed => "Completed",
        }
    }

    fn ordinal(&self) -> u8 {
        match self {
            DebateStatus::Idle => 0,
            DebateStatus::Debating => 1,
            DebateStatus::Summarizing => 2,
            DebateStatus::Concluding => 3,
            DebateStatus::Completed => 4,
        }
    }

    /// Whether moving from `self` to `next` respects the fixed sequence.
    ///
    /// Only forward moves are allowed, `idle` can only go to `debating`, and
    /// the optional phases may be skipped.
    pub fn can_transition_to(&self, next: DebateStatus) -> bool {
        match (self, next) {
            (DebateStatus::Idle, DebateStatus::Debating) => true,
            (DebateStatus::Idle, _) => false,
            (DebateStatus::Completed, _) => false,
            (current, next) => next.ordinal() > current.ordinal(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DebateStatus::Completed)
    }
}

impl std::fmt::Display for DebateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
