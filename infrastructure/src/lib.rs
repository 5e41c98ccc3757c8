//! Infrastructure layer for ai-committee
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the Copilot CLI conversation gateway, configuration
//! file loading and the JSONL debate event log.

pub mod config;
pub mod copilot;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileConfig, FileDebateConfig, FileLoggingConfig, FileMemberConfig,
    FileOutputConfig, Severity,
};
pub use copilot::{
    error::{CopilotError, Result},
    gateway::CopilotGateway,
    router::MessageRouter,
    session::CopilotSession,
};
pub use logging::JsonlEventLog;
