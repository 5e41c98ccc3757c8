//! Debate session entity

use super::config::DebateConfig;
use super::statement::Statement;
use super::status::DebateStatus;
use super::transcript::Transcript;
use crate::core::error::DomainError;
use crate::participant::entities::Participant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single active debate (Entity)
///
/// Identity and configuration are fixed at creation. Status, current round,
/// transcript, summary and verdict change only through the methods below.
#[derive(Debug, Clone)]
pub struct DebateSession {
    id: String,
    config: DebateConfig,
    status: DebateStatus,
    current_round: u32,
    transcript: Transcript,
    summary: Option<String>,
    verdict: Option<String>,
    created_at: DateTime<Utc>,
}

impl DebateSession {
    pub fn new(config: DebateConfig) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            config,
            status: DebateStatus::Idle,
            current_round: 0,
            transcript: Transcript::new(),
            summary: None,
            verdict: None,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &DebateConfig {
        &self.config
    }

    pub fn members(&self) -> &[Participant] {
        &self.config.members
    }

    pub fn status(&self) -> DebateStatus {
        self.status
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn verdict(&self) -> Option<&str> {
        self.verdict.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Move to `next`, enforcing the fixed status sequence.
    pub fn transition_to(&mut self, next: DebateStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }

    pub fn begin_round(&mut self, round: u32) {
        self.current_round = round;
    }

    pub fn record(&mut self, statement: Statement) {
        self.transcript.append(statement);
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary = Some(summary.into());
    }

    pub fn set_verdict(&mut self, verdict: impl Into<String>) {
        self.verdict = Some(verdict.into());
    }

    pub fn snapshot(&self) -> DebateSnapshot {
        DebateSnapshot {
            session_id: self.id.clone(),
            status: self.status,
            current_round: self.current_round,
            max_rounds: self.config.max_rounds,
            topic: self.config.topic.content().to_string(),
            members: self.config.members.clone(),
            enable_web_search: self.config.enable_web_search,
            statements: self.transcript.statements().to_vec(),
            summary: self.summary.clone(),
            verdict: self.verdict.clone(),
            created_at: self.created_at,
        }
    }
}

/// Point-in-time copy of a session, for display and reconnect/resume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateSnapshot {
    pub session_id: String,
    pub status: DebateStatus,
    pub current_round: u32,
    pub max_rounds: u32,
    pub topic: String,
    pub members: Vec<Participant>,
    pub enable_web_search: bool,
    pub statements: Vec<Statement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DebateSnapshot {
    /// Statements spoken inside debate rounds
    pub fn round_statements(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter().filter(|s| s.is_round_bound())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ModelSelector;
    use crate::debate::config::StartDebateRequest;
    use crate::participant::entities::ParticipantSpec;
    use crate::participant::role::Role;

    fn session() -> DebateSession {
        let request = StartDebateRequest::new(
            "X",
            2,
            vec![
                ParticipantSpec::new("A", ModelSelector::default(), Role::Proponent),
                ParticipantSpec::new("J", ModelSelector::default(), Role::Adjudicator),
            ],
        );
        DebateSession::new(DebateConfig::from_request(request).unwrap())
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = session();
        assert_eq!(session.status(), DebateStatus::Idle);
        assert_eq!(session.current_round(), 0);
        assert!(session.transcript().is_empty());
        assert!(session.summary().is_none());
        assert!(session.verdict().is_none());
    }

    #[test]
    fn test_transition_enforces_sequence() {
        let mut session = session();
        assert!(session.transition_to(DebateStatus::Completed).is_err());
        session.transition_to(DebateStatus::Debating).unwrap();
        session.transition_to(DebateStatus::Concluding).unwrap();
        assert!(session.transition_to(DebateStatus::Summarizing).is_err());
        session.transition_to(DebateStatus::Completed).unwrap();
        assert_eq!(session.status(), DebateStatus::Completed);
    }

    #[test]
    fn test_snapshot_copies_state() {
        let mut session = session();
        session.begin_round(1);
        let speaker = session.members()[0].clone();
        session.record(Statement::new(&speaker, 1).finalize("a1"));
        session.set_verdict("adopt");

        let snapshot = session.snapshot();
        assert_eq!(snapshot.session_id, session.id());
        assert_eq!(snapshot.current_round, 1);
        assert_eq!(snapshot.max_rounds, 2);
        assert_eq!(snapshot.statements.len(), 1);
        assert_eq!(snapshot.verdict.as_deref(), Some("adopt"));
        assert!(snapshot.summary.is_none());

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("summary").is_none());
        assert_eq!(json["maxRounds"], 2);
    }
}
