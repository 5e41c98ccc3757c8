//! Model selector value object
//!
//! A participant talks to exactly one model through one backend. The pair is
//! kept together so the adapter can derive the backend-specific model id.

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Model used when a roster entry does not name one
pub const DEFAULT_MODEL: &str = "gpt-5-mini";

/// Conversational backend hosting a model (Value Object)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// GitHub Copilot CLI models
    #[default]
    Copilot,
    /// Gemini CLI models, reached through the Copilot CLI server
    Gemini,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Copilot => "copilot",
            Backend::Gemini => "gemini",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Backend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "copilot" => Ok(Backend::Copilot),
            "gemini" => Ok(Backend::Gemini),
            other => Err(DomainError::InvalidModel(format!(
                "unknown backend '{}'",
                other
            ))),
        }
    }
}

/// Model + backend pair assigned to a participant (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelSelector {
    pub model: String,
    #[serde(default, alias = "cli")]
    pub backend: Backend,
}

impl ModelSelector {
    pub fn new(model: impl Into<String>, backend: Backend) -> Self {
        Self {
            model: model.into(),
            backend,
        }
    }

    pub fn copilot(model: impl Into<String>) -> Self {
        Self::new(model, Backend::Copilot)
    }

    pub fn gemini(model: impl Into<String>) -> Self {
        Self::new(model, Backend::Gemini)
    }

    /// Model id as the Copilot CLI server expects it.
    ///
    /// Gemini models are routed through the same server and carry a
    /// `gemini:` prefix.
    pub fn session_model_id(&self) -> String {
        match self.backend {
            Backend::Copilot => self.model.clone(),
            Backend::Gemini => format!("gemini:{}", self.model),
        }
    }
}

impl Default for ModelSelector {
    fn default() -> Self {
        Self::copilot(DEFAULT_MODEL)
    }
}

impl std::fmt::Display for ModelSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.model, self.backend)
    }
}

impl std::str::FromStr for ModelSelector {
    type Err = DomainError;

    /// Parses `model` or `model@backend`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (model, backend) = match s.rsplit_once('@') {
            Some((model, backend)) => (model, backend.parse()?),
            None => (s, Backend::default()),
        };
        let model = model.trim();
        if model.is_empty() {
            return Err(DomainError::InvalidModel(s.to_string()));
        }
        Ok(Self::new(model, backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copilot_model_id_is_unprefixed() {
        let selector = ModelSelector::copilot("claude-sonnet-4.5");
        assert_eq!(selector.session_model_id(), "claude-sonnet-4.5");
    }

    #[test]
    fn test_gemini_model_id_is_prefixed() {
        let selector = ModelSelector::gemini("gemini-3-flash-preview");
        assert_eq!(selector.session_model_id(), "gemini:gemini-3-flash-preview");
    }

    #[test]
    fn test_parse_with_backend() {
        let selector: ModelSelector = "gemini-3-pro-preview@gemini".parse().unwrap();
        assert_eq!(selector.backend, Backend::Gemini);
        assert_eq!(selector.model, "gemini-3-pro-preview");
    }

    #[test]
    fn test_parse_defaults_to_copilot() {
        let selector: ModelSelector = "gpt-4.1".parse().unwrap();
        assert_eq!(selector, ModelSelector::copilot("gpt-4.1"));
        assert_eq!(selector.to_string(), "gpt-4.1@copilot");
    }

    #[test]
    fn test_parse_rejects_unknown_backend_and_empty_model() {
        assert!("gpt-4.1@openai".parse::<ModelSelector>().is_err());
        assert!("@copilot".parse::<ModelSelector>().is_err());
    }

    #[test]
    fn test_backend_defaults_when_missing_in_json() {
        let selector: ModelSelector = serde_json::from_str(r#"{"model":"gpt-5-mini"}"#).unwrap();
        assert_eq!(selector.backend, Backend::Copilot);
    }
}
