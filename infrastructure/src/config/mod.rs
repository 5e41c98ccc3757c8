//! Configuration file loading for ai-committee
//!
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./committee.toml` or `./.committee.toml`
//! 3. Global: `$XDG_CONFIG_HOME/ai-committee/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, ConfigIssueCode, FileConfig, FileDebateConfig, FileLoggingConfig,
    FileMemberConfig, FileOutputConfig, Severity, default_roster,
};
pub use loader::ConfigLoader;
