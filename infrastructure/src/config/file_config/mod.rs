//! Raw TOML configuration data types
//!
//! These structs mirror the TOML file. They are deserialized as-is and turned
//! into domain types (`ParticipantSpec`, `StartDebateRequest`) on demand,
//! collecting [`ConfigIssue`]s instead of failing.

mod debate;
mod issues;
mod logging;
mod members;
mod output;

pub use debate::FileDebateConfig;
pub use issues::{ConfigIssue, ConfigIssueCode, Severity};
pub use logging::FileLoggingConfig;
pub use members::{FileMemberConfig, default_roster};
pub use output::FileOutputConfig;

use committee_domain::{ParticipantSpec, StartDebateRequest};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub debate: FileDebateConfig,
    /// Committee roster; replaces the built-in one when present
    pub members: Vec<FileMemberConfig>,
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            debate: FileDebateConfig::default(),
            members: default_roster(),
            output: FileOutputConfig::default(),
            logging: FileLoggingConfig::default(),
        }
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.debate.validate();
        issues.extend(self.roster().1);
        issues
    }

    /// Participant specs for every usable roster entry.
    pub fn roster(&self) -> (Vec<ParticipantSpec>, Vec<ConfigIssue>) {
        let mut specs = Vec::with_capacity(self.members.len());
        let mut issues = Vec::new();
        for (index, member) in self.members.iter().enumerate() {
            let (spec, member_issues) = member.to_spec(index);
            specs.extend(spec);
            issues.extend(member_issues);
        }
        (specs, issues)
    }

    /// Build a start request for `topic` from this configuration.
    pub fn start_request(&self, topic: impl Into<String>) -> StartDebateRequest {
        StartDebateRequest::new(topic, self.debate.rounds, self.roster().0)
            .with_web_search(self.debate.enable_web_search)
    }
}
