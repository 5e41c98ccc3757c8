//! Debate settings from TOML (`[debate]` section)

use super::issues::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw debate configuration from TOML
///
/// ```toml
/// [debate]
/// rounds = 3
/// enable_web_search = true
/// response_language = "English"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Number of debate rounds before closing
    pub rounds: u32,
    /// Let participants use the web lookup tools
    pub enable_web_search: bool,
    /// Language every participant answers in
    pub response_language: Option<String>,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            rounds: 3,
            enable_web_search: true,
            response_language: None,
        }
    }
}

impl FileDebateConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.rounds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroRounds,
                "debate.rounds must be at least 1",
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debate_section_partial() {
        let config: super::super::FileConfig = toml::from_str(
            r#"
[debate]
rounds = 5
"#,
        )
        .unwrap();
        assert_eq!(config.debate.rounds, 5);
        assert!(config.debate.enable_web_search);
        assert!(config.debate.response_language.is_none());
    }

    #[test]
    fn test_zero_rounds_is_error() {
        let debate = FileDebateConfig {
            rounds: 0,
            ..Default::default()
        };
        let issues = debate.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::ZeroRounds);
    }
}
