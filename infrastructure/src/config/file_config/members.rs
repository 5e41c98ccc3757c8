//! Committee roster from TOML (`[[members]]` array)

use super::issues::{ConfigIssue, ConfigIssueCode};
use committee_domain::{Backend, DEFAULT_MODEL, ModelSelector, ParticipantSpec, Role};
use serde::{Deserialize, Serialize};

/// One roster entry as written in TOML
///
/// ```toml
/// [[members]]
/// name = "Member A"
/// model = "gemini-3-pro-preview"
/// backend = "gemini"
/// role = "proponent"
/// custom_prompt = "Focus on cost."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMemberConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, alias = "cli", skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
}

impl FileMemberConfig {
    pub fn new(name: &str, role: Role) -> Self {
        Self {
            name: name.to_string(),
            model: Some(DEFAULT_MODEL.to_string()),
            backend: Some(Backend::Copilot.to_string()),
            role: role.to_string(),
            custom_prompt: None,
        }
    }

    /// Convert to a participant spec.
    ///
    /// Entries with an empty name or an unknown role are dropped; an unknown
    /// backend or missing model falls back to the default.
    pub fn to_spec(&self, index: usize) -> (Option<ParticipantSpec>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let name = self.name.trim();
        if name.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyMemberName { index },
                format!("members[{}]: name cannot be empty", index),
            ));
            return (None, issues);
        }

        let role: Role = match self.role.parse() {
            Ok(role) => role,
            Err(e) => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownRole {
                        member: name.to_string(),
                        value: self.role.clone(),
                    },
                    format!("members.{}: {}", name, e),
                ));
                return (None, issues);
            }
        };

        let backend = match self.backend.as_deref() {
            None => Backend::default(),
            Some(value) => value.parse().unwrap_or_else(|_| {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownBackend {
                        member: name.to_string(),
                        value: value.to_string(),
                    },
                    format!(
                        "members.{}: unknown backend '{}', falling back to '{}'",
                        name,
                        value,
                        Backend::default()
                    ),
                ));
                Backend::default()
            }),
        };

        let model = match self.model.as_deref().map(str::trim) {
            Some(model) if !model.is_empty() => model.to_string(),
            Some(_) => {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::EmptyModelName {
                        member: name.to_string(),
                    },
                    format!(
                        "members.{}: model name is empty, using '{}'",
                        name, DEFAULT_MODEL
                    ),
                ));
                DEFAULT_MODEL.to_string()
            }
            None => DEFAULT_MODEL.to_string(),
        };

        let mut spec = ParticipantSpec::new(name, ModelSelector::new(model, backend), role);
        if let Some(prompt) = self.custom_prompt.as_deref().filter(|p| !p.trim().is_empty()) {
            spec = spec.with_custom_prompt(prompt);
        }
        (Some(spec), issues)
    }
}

/// Built-in committee: four proponents, one contrarian, a recorder and an adjudicator.
pub fn default_roster() -> Vec<FileMemberConfig> {
    vec![
        FileMemberConfig::new("Member A", Role::Proponent),
        FileMemberConfig::new("Member B", Role::Proponent),
        FileMemberConfig::new("Member C", Role::Proponent),
        FileMemberConfig::new("Member D", Role::Proponent),
        FileMemberConfig::new("Tenth Man", Role::Contrarian),
        FileMemberConfig::new("Recorder", Role::Recorder),
        FileMemberConfig::new("Adjudicator", Role::Adjudicator),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, role: &str) -> FileMemberConfig {
        FileMemberConfig {
            name: name.to_string(),
            model: None,
            backend: None,
            role: role.to_string(),
            custom_prompt: None,
        }
    }

    #[test]
    fn test_default_roster_shape() {
        let roster = default_roster();
        assert_eq!(roster.len(), 7);
        let specs: Vec<_> = roster
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.to_spec(i).0)
            .collect();
        assert_eq!(specs.len(), 7);
        assert_eq!(
            specs.iter().filter(|s| s.role == Role::Proponent).count(),
            4
        );
        assert!(specs.iter().all(|s| s.selector == ModelSelector::default()));
    }

    #[test]
    fn test_legacy_role_and_cli_alias() {
        let entry: FileMemberConfig = toml::from_str(
            r#"
name = "Judge"
model = "gemini-3-pro-preview"
cli = "gemini"
role = "arbiter"
"#,
        )
        .unwrap();
        let (spec, issues) = entry.to_spec(0);
        let spec = spec.unwrap();
        assert!(issues.is_empty());
        assert_eq!(spec.role, Role::Adjudicator);
        assert_eq!(spec.selector.session_model_id(), "gemini:gemini-3-pro-preview");
    }

    #[test]
    fn test_unknown_role_drops_member() {
        let (spec, issues) = member("X", "moderator").to_spec(2);
        assert!(spec.is_none());
        assert!(matches!(issues[0].code, ConfigIssueCode::UnknownRole { .. }));
    }

    #[test]
    fn test_unknown_backend_falls_back() {
        let mut entry = member("X", "proponent");
        entry.backend = Some("claude".into());
        let (spec, issues) = entry.to_spec(0);
        assert_eq!(spec.unwrap().selector.backend, Backend::Copilot);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, super::super::Severity::Warning);
    }

    #[test]
    fn test_empty_name_is_error() {
        let (spec, issues) = member("  ", "proponent").to_spec(4);
        assert!(spec.is_none());
        assert_eq!(issues[0].code, ConfigIssueCode::EmptyMemberName { index: 4 });
    }

    #[test]
    fn test_custom_prompt_kept() {
        let mut entry = member("X", "contrarian");
        entry.custom_prompt = Some("Attack the budget.".into());
        let spec = entry.to_spec(0).0.unwrap();
        assert_eq!(spec.custom_prompt.as_deref(), Some("Attack the budget."));
    }
}
