//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving every non-delta debate event
    pub event_log: Option<PathBuf>,
    /// Directory for daily-rolling diagnostic logs
    pub log_dir: Option<PathBuf>,
}
