//! Presentation layer for ai-committee
//!
//! This crate contains the CLI definition, the live console presenter and
//! the formatters for finished debates.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormatArg};
pub use cli::member_arg::parse_member;
pub use config::OutputConfig;
pub use output::{console::ConsoleFormatter, formatter::OutputFormatter};
pub use progress::presenter::ConsolePresenter;
