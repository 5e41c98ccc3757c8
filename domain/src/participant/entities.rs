//! Participant entities

use super::role::Role;
use crate::core::model::ModelSelector;
use serde::{Deserialize, Serialize};

/// Unique identifier for a participant within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A roster entry as supplied by the caller (no id yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ParticipantSpec {
    pub name: String,
    #[serde(flatten)]
    pub selector: ModelSelector,
    pub role: Role,
    #[serde(default, alias = "customPrompt", skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
}

impl ParticipantSpec {
    pub fn new(name: impl Into<String>, selector: ModelSelector, role: Role) -> Self {
        Self {
            name: name.into(),
            selector,
            role,
            custom_prompt: None,
        }
    }

    pub fn with_custom_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.custom_prompt = Some(prompt.into());
        self
    }
}

/// A debate participant (Entity)
///
/// Created once at session start from a [`ParticipantSpec`] and immutable for
/// the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    id: ParticipantId,
    name: String,
    selector: ModelSelector,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_prompt: Option<String>,
}

impl Participant {
    pub fn new(id: ParticipantId, spec: ParticipantSpec) -> Self {
        Self {
            id,
            name: spec.name,
            selector: spec.selector,
            role: spec.role,
            custom_prompt: spec.custom_prompt,
        }
    }

    /// Build a participant with a freshly generated id.
    pub fn from_spec(spec: ParticipantSpec) -> Self {
        Self::new(ParticipantId::generate(), spec)
    }

    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selector(&self) -> &ModelSelector {
        &self.selector
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// The caller's instruction override, if it has any non-blank text.
    pub fn custom_instruction(&self) -> Option<&str> {
        self.custom_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
    }
}
