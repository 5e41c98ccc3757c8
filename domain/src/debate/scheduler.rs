//! Turn scheduler
//!
//! Decides who speaks in each round and which closing phases run. All
//! functions are pure over the roster slice.

use crate::debate::status::DebateStatus;
use crate::participant::entities::Participant;
use crate::participant::role::Role;

/// A single-speaker phase that runs once after the debate rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosingPhase {
    /// The recorder's synthesis of the whole debate
    Summary,
    /// The adjudicator's final verdict
    Verdict,
}

impl ClosingPhase {
    pub fn status(&self) -> DebateStatus {
        match self {
            ClosingPhase::Summary => DebateStatus::Summarizing,
            ClosingPhase::Verdict => DebateStatus::Concluding,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            ClosingPhase::Summary => Role::Recorder,
            ClosingPhase::Verdict => Role::Adjudicator,
        }
    }
}

/// Computes speaking order and closing phases
pub struct TurnScheduler;

impl TurnScheduler {
    /// Proponents then contrarians, each group in roster order.
    ///
    /// Recorders and adjudicators never take a round turn.
    pub fn ordered_debaters(roster: &[Participant]) -> Vec<&Participant> {
        let mut debaters: Vec<&Participant> =
            roster.iter().filter(|p| p.role().is_debater()).collect();
        // sort_by_key is stable, so intra-group order survives
        debaters.sort_by_key(|p| p.role().speaking_rank());
        debaters
    }

    /// First recorder in roster order; later ones are ignored.
    pub fn recorder(roster: &[Participant]) -> Option<&Participant> {
        roster.iter().find(|p| p.role() == Role::Recorder)
    }

    /// First adjudicator in roster order; later ones are ignored.
    pub fn adjudicator(roster: &[Participant]) -> Option<&Participant> {
        roster.iter().find(|p| p.role() == Role::Adjudicator)
    }

    /// Closing phases to run after the last round, in order, with their speaker.
    pub fn closing_phases(roster: &[Participant]) -> Vec<(ClosingPhase, &Participant)> {
        let mut phases = Vec::with_capacity(2);
        if let Some(recorder) = Self::recorder(roster) {
            phases.push((ClosingPhase::Summary, recorder));
        }
        if let Some(adjudicator) = Self::adjudicator(roster) {
            phases.push((ClosingPhase::Verdict, adjudicator));
        }
        phases
    }
}
