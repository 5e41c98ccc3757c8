//! Debate configuration

use crate::core::error::DomainError;
use crate::core::topic::Topic;
use crate::debate::scheduler::TurnScheduler;
use crate::participant::entities::{Participant, ParticipantSpec};
use crate::participant::role::Role;
use serde::{Deserialize, Serialize};

fn default_web_search() -> bool {
    true
}

/// Caller-supplied request to start a debate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartDebateRequest {
    pub topic: String,
    pub max_rounds: u32,
    pub members: Vec<ParticipantSpec>,
    #[serde(default = "default_web_search")]
    pub enable_web_search: bool,
}

impl StartDebateRequest {
    pub fn new(topic: impl Into<String>, max_rounds: u32, members: Vec<ParticipantSpec>) -> Self {
        Self {
            topic: topic.into(),
            max_rounds,
            members,
            enable_web_search: true,
        }
    }

    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.enable_web_search = enabled;
        self
    }

    /// Check the request without allocating anything.
    pub fn validate(&self) -> Result<(), DomainError> {
        Topic::try_new(self.topic.as_str())?;
        if self.max_rounds == 0 {
            return Err(DomainError::InvalidRounds(self.max_rounds));
        }
        if self.members.is_empty() {
            return Err(DomainError::EmptyRoster);
        }
        if let Some(index) = self.members.iter().position(|m| m.name.trim().is_empty()) {
            return Err(DomainError::EmptyMemberName(index));
        }
        if !self.members.iter().any(|m| m.role == Role::Adjudicator) {
            return Err(DomainError::NoAdjudicator);
        }
        Ok(())
    }
}

/// Immutable configuration snapshot of a debate session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateConfig {
    pub topic: Topic,
    pub max_rounds: u32,
    pub members: Vec<Participant>,
    pub has_recorder: bool,
    pub has_adjudicator: bool,
    pub enable_web_search: bool,
}

impl DebateConfig {
    /// Validate a request and assign a fresh id to every roster entry.
    pub fn from_request(request: StartDebateRequest) -> Result<Self, DomainError> {
        request.validate()?;
        let topic = Topic::try_new(request.topic)?;
        let members: Vec<Participant> = request
            .members
            .into_iter()
            .map(Participant::from_spec)
            .collect();

        Ok(Self {
            has_recorder: TurnScheduler::recorder(&members).is_some(),
            has_adjudicator: TurnScheduler::adjudicator(&members).is_some(),
            topic,
            max_rounds: request.max_rounds,
            members,
            enable_web_search: request.enable_web_search,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ModelSelector;

    fn spec(name: &str, role: Role) -> ParticipantSpec {
        ParticipantSpec::new(name, ModelSelector::default(), role)
    }

    fn roster() -> Vec<ParticipantSpec> {
        vec![
            spec("A", Role::Proponent),
            spec("B", Role::Contrarian),
            spec("J", Role::Adjudicator),
        ]
    }

    #[test]
    fn test_valid_request_builds_config() {
        let config = DebateConfig::from_request(StartDebateRequest::new("X", 2, roster())).unwrap();
        assert_eq!(config.topic.content(), "X");
        assert_eq!(config.max_rounds, 2);
        assert_eq!(config.members.len(), 3);
        assert!(!config.has_recorder);
        assert!(config.has_adjudicator);
        assert!(config.enable_web_search);
    }

    #[test]
    fn test_rejects_empty_topic() {
        let request = StartDebateRequest::new("  ", 2, roster());
        assert_eq!(request.validate(), Err(DomainError::EmptyTopic));
    }

    #[test]
    fn test_rejects_zero_rounds() {
        let request = StartDebateRequest::new("X", 0, roster());
        assert_eq!(request.validate(), Err(DomainError::InvalidRounds(0)));
    }

    #[test]
    fn test_rejects_roster_without_adjudicator() {
        let request = StartDebateRequest::new(
            "X",
            1,
            vec![spec("A", Role::Proponent), spec("S", Role::Recorder)],
        );
        assert_eq!(request.validate(), Err(DomainError::NoAdjudicator));
    }

    #[test]
    fn test_rejects_blank_member_name() {
        let mut members = roster();
        members[1].name = " ".to_string();
        let request = StartDebateRequest::new("X", 1, members);
        assert_eq!(request.validate(), Err(DomainError::EmptyMemberName(1)));
    }

    #[test]
    fn test_request_deserializes_with_default_web_search() {
        let json = r#"{
            "topic": "X",
            "maxRounds": 3,
            "members": [{"name": "J", "model": "gpt-5-mini", "role": "arbiter"}]
        }"#;
        let request: StartDebateRequest = serde_json::from_str(json).unwrap();
        assert!(request.enable_web_search);
        assert!(request.validate().is_ok());
    }
}
