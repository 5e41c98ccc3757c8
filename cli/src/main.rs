//! CLI entrypoint for AI Committee
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use colored::Colorize;
use committee_application::{ControllerOptions, DebateController, DebateError};
use committee_domain::{DEFAULT_RESPONSE_LANGUAGE, OutputFormat, StartDebateRequest};
use committee_infrastructure::{
    ConfigLoader, CopilotGateway, FileConfig, JsonlEventLog, Severity,
};
use committee_presentation::{
    Cli, ConsoleFormatter, ConsolePresenter, OutputConfig, OutputFormatter,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Exit code after Ctrl-C
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    let log_dir = cli.log_dir.as_deref().or(config.logging.log_dir.as_deref());
    let _log_guard = init_logging(cli.verbose, log_dir);
    info!("Starting AI Committee");

    report_config_issues(&config);

    let Some(topic) = cli.topic.clone() else {
        bail!("A topic is required. Example: ai-committee \"Should we adopt Rust?\"");
    };

    let output = OutputConfig::resolve(
        cli.output.map(OutputFormat::from),
        config.output.format,
        config.output.color,
        cli.no_color,
        cli.quiet,
    );
    if !output.color {
        colored::control::set_override(false);
    }

    let request = build_request(&cli, &config, topic);
    let language = cli
        .language
        .clone()
        .or_else(|| config.debate.response_language.clone())
        .unwrap_or_else(|| DEFAULT_RESPONSE_LANGUAGE.to_string());

    // === Dependency Injection ===
    let gateway = Arc::new(CopilotGateway::new().await?);
    let controller = Arc::new(DebateController::with_options(
        gateway,
        ControllerOptions::default().with_response_language(language),
    ));

    if output.live {
        controller.subscribe(Arc::new(ConsolePresenter::stdout(output.show_progress)));
    }
    let event_log = cli.event_log.as_deref().or(config.logging.event_log.as_deref());
    if let Some(path) = event_log {
        match JsonlEventLog::new(path) {
            Some(log) => controller.subscribe(Arc::new(log)),
            None => warn!("Event log disabled: cannot write {}", path.display()),
        }
    }

    let interrupt = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\n{}", "Interrupted, shutting down...".yellow());
                if let Err(e) = controller.shutdown().await {
                    warn!("Shutdown failed: {}", e);
                }
            }
        }
    });

    let outcome = run_debate(&controller, request).await;
    interrupt.abort();
    controller.shutdown().await?;

    match outcome {
        Ok(snapshot) => {
            println!("{}", ConsoleFormatter.render(&snapshot, output.format));
            Ok(())
        }
        Err(DebateError::Aborted | DebateError::ShutDown) => std::process::exit(EXIT_INTERRUPTED),
        Err(e) => Err(e.into()),
    }
}

async fn run_debate(
    controller: &DebateController<CopilotGateway>,
    request: StartDebateRequest,
) -> Result<committee_domain::DebateSnapshot, DebateError> {
    controller.start(request).await?;
    controller.run().await
}

/// Config file values overridden by CLI flags
fn build_request(cli: &Cli, config: &FileConfig, topic: String) -> StartDebateRequest {
    let mut request = config.start_request(topic);
    if let Some(rounds) = cli.rounds {
        request.max_rounds = rounds;
    }
    if !cli.members.is_empty() {
        request.members = cli.members.clone();
    }
    if cli.no_web_search {
        request.enable_web_search = false;
    }
    request
}

fn report_config_issues(config: &FileConfig) {
    for issue in config.validate() {
        let line = issue.to_string();
        match issue.severity {
            Severity::Error => eprintln!("{} {}", "config".red().bold(), line),
            Severity::Warning => eprintln!("{} {}", "config".yellow().bold(), line),
        }
    }
}

/// Console logging driven by `-v` (`RUST_LOG` overrides), plus an optional
/// daily-rolling file under `log_dir`.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "ai-committee.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use committee_domain::Role;

    #[test]
    fn test_cli_flags_override_config() {
        let cli = Cli::try_parse_from([
            "ai-committee",
            "-r",
            "1",
            "--no-web-search",
            "-m",
            "Solo=gpt-5:proponent",
            "-m",
            "Judge=gpt-5:adjudicator",
            "topic",
        ])
        .unwrap();
        let request = build_request(&cli, &FileConfig::default(), "topic".into());
        assert_eq!(request.max_rounds, 1);
        assert!(!request.enable_web_search);
        assert_eq!(request.members.len(), 2);
        assert_eq!(request.members[1].role, Role::Adjudicator);
    }

    #[test]
    fn test_config_used_without_flags() {
        let cli = Cli::try_parse_from(["ai-committee", "topic"]).unwrap();
        let request = build_request(&cli, &FileConfig::default(), "topic".into());
        assert_eq!(request.max_rounds, 3);
        assert!(request.enable_web_search);
        assert_eq!(request.members.len(), 7);
    }
}
