//! CLI command definitions

use super::member_arg::parse_member;
use clap::{Parser, ValueEnum};
use committee_domain::{OutputFormat, ParticipantSpec};
use std::path::PathBuf;

/// Output format for the finished debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Every round, the recorder's summary and the verdict
    Full,
    /// Only the adjudicator's verdict
    Verdict,
    /// The final session snapshot as JSON
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Full => OutputFormat::Full,
            OutputFormatArg::Verdict => OutputFormat::Verdict,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for ai-committee
#[derive(Parser, Debug)]
#[command(name = "ai-committee")]
#[command(author, version, about = "AI Committee - models debate a topic in rounds and reach a verdict")]
#[command(long_about = r#"
AI Committee runs a structured debate between several models.

Proponents argue for the topic and a contrarian argues against it, round by
round. When the rounds are over a recorder summarizes the debate and an
adjudicator delivers the final verdict.

Configuration files are loaded from (in priority order):
1. --config <path>        Explicit config file
2. ./committee.toml       Project-level config
3. ~/.config/ai-committee/config.toml   Global config

Example:
  ai-committee "Should our team adopt a four-day work week?"
  ai-committee -r 2 -m "Optimist=gpt-5:proponent" -m "Skeptic=gemini-3-pro-preview@gemini:contrarian" \
               -m "Judge=gpt-5-mini:adjudicator" "Rewrite the billing service in Rust?"
"#)]
pub struct Cli {
    /// The topic to debate
    pub topic: Option<String>,

    /// Number of debate rounds
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<u32>,

    /// Committee member as NAME=MODEL[@BACKEND]:ROLE (repeatable; replaces the configured roster)
    #[arg(short, long = "member", value_name = "SPEC", value_parser = parse_member)]
    pub members: Vec<ParticipantSpec>,

    /// Do not let participants use web search
    #[arg(long)]
    pub no_web_search: bool,

    /// Language every participant answers in
    #[arg(long, value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Output format for the final result
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormatArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Do not stream the debate; print only the final result
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write every debate event to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Directory for daily-rolling diagnostic logs
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use committee_domain::{Backend, Role};

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::try_parse_from([
            "ai-committee",
            "-r",
            "2",
            "-m",
            "Optimist=gpt-5:proponent",
            "--member",
            "Skeptic=gemini-3-pro-preview@gemini:tenth_man",
            "--no-web-search",
            "-o",
            "json",
            "-vv",
            "Adopt Rust?",
        ])
        .unwrap();

        assert_eq!(cli.topic.as_deref(), Some("Adopt Rust?"));
        assert_eq!(cli.rounds, Some(2));
        assert_eq!(cli.members.len(), 2);
        assert_eq!(cli.members[1].role, Role::Contrarian);
        assert_eq!(cli.members[1].selector.backend, Backend::Gemini);
        assert!(cli.no_web_search);
        assert_eq!(cli.output.map(OutputFormat::from), Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ai-committee", "topic"]).unwrap();
        assert!(cli.members.is_empty());
        assert!(cli.rounds.is_none());
        assert!(cli.output.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn test_bad_member_is_rejected() {
        assert!(Cli::try_parse_from(["ai-committee", "-m", "nobody", "topic"]).is_err());
    }
}
