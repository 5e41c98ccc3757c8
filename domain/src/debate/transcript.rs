//! Transcript store
//!
//! Append-only log of finalized statements for the active session. Entries
//! are never reordered or removed, so append order within a round is the
//! speaking order.

use super::statement::Statement;
use crate::participant::entities::ParticipantId;
use serde::{Deserialize, Serialize};

/// Whether `statement` is visible to `speaker` when it speaks in `round`.
///
/// Earlier rounds are always visible; same-round entries only when another
/// participant produced them.
pub fn is_visible_to(statement: &Statement, speaker: &ParticipantId, round: u32) -> bool {
    statement.round < round || (statement.round == round && &statement.participant_id != speaker)
}

/// Append-only, round-ordered statement log (Entity)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    statements: Vec<Statement>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized statement. Ownership moves into the store, so the
    /// same statement value cannot be appended twice.
    pub fn append(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Entries a participant may see when speaking in `round`: everything
    /// from earlier rounds, plus same-round entries from other participants.
    pub fn visible_to<'a>(
        &'a self,
        participant: &'a ParticipantId,
        round: u32,
    ) -> impl Iterator<Item = &'a Statement> + 'a {
        self.statements
            .iter()
            .filter(move |s| is_visible_to(s, participant, round))
    }

    /// Statements produced inside debate rounds (closing phases excluded)
    pub fn round_bound(&self) -> Vec<Statement> {
        self.statements
            .iter()
            .filter(|s| s.is_round_bound())
            .cloned()
            .collect()
    }

    /// Statements spoken in a given round, in speaking order
    pub fn in_round(&self, round: u32) -> impl Iterator<Item = &Statement> {
        self.statements.iter().filter(move |s| s.round == round)
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
