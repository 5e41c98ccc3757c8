//! Console presenter for a running debate
//!
//! Streams each statement to the terminal as the deltas arrive. A spinner
//! covers the wait between a speaker being announced and its first delta.

use colored::{ColoredString, Colorize};
use committee_application::DebateObserver;
use committee_domain::{DebateEvent, DebateStatus, Role};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

/// Role-colored label used in headers
pub fn role_label(role: Role, text: &str) -> ColoredString {
    match role {
        Role::Proponent => text.green().bold(),
        Role::Contrarian => text.red().bold(),
        Role::Recorder => text.blue().bold(),
        Role::Adjudicator => text.magenta().bold(),
    }
}

fn status_line(status: DebateStatus) -> Option<&'static str> {
    match status {
        DebateStatus::Idle | DebateStatus::Debating => None,
        DebateStatus::Summarizing => Some("The recorder is summarizing the debate..."),
        DebateStatus::Concluding => Some("The adjudicator is deliberating..."),
        DebateStatus::Completed => Some("Debate complete."),
    }
}

#[derive(Default)]
struct TurnState {
    spinner: Option<ProgressBar>,
    /// Whether the current speaker has printed any text yet
    streaming: bool,
}

/// [`DebateObserver`] that renders the debate live
pub struct ConsolePresenter {
    out: Mutex<Box<dyn Write + Send>>,
    turn: Mutex<TurnState>,
    show_progress: bool,
}

impl ConsolePresenter {
    /// Presenter writing to stdout
    pub fn stdout(show_progress: bool) -> Self {
        Self::with_writer(Box::new(std::io::stdout()), show_progress)
    }

    pub fn with_writer(out: Box<dyn Write + Send>, show_progress: bool) -> Self {
        Self {
            out: Mutex::new(out),
            turn: Mutex::new(TurnState::default()),
            show_progress,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }

    fn clear_spinner(turn: &mut TurnState) {
        if let Some(spinner) = turn.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl DebateObserver for ConsolePresenter {
    fn on_event(&self, event: &DebateEvent) {
        let mut turn = self.turn.lock().unwrap_or_else(|e| e.into_inner());
        match event {
            DebateEvent::SessionStarted { session } => {
                let line = "=".repeat(60);
                self.write(&format!(
                    "{}\n{} {}\n{} {} rounds, {} members{}\n{}\n",
                    line.cyan(),
                    "Topic:".cyan().bold(),
                    session.topic,
                    "Setup:".cyan().bold(),
                    session.max_rounds,
                    session.members.len(),
                    if session.enable_web_search {
                        ", web search on"
                    } else {
                        ""
                    },
                    line.cyan()
                ));
            }
            DebateEvent::RoundStarted { round } => {
                self.write(&format!(
                    "\n{}\n",
                    format!("── Round {} ──", round).cyan().bold()
                ));
            }
            DebateEvent::MemberSpeaking { member, .. } => {
                Self::clear_spinner(&mut turn);
                turn.streaming = false;
                self.write(&format!(
                    "\n{} {}\n",
                    role_label(member.role(), member.name()),
                    format!("({}, {})", member.role().display_name(), member.selector()).dimmed()
                ));
                if self.show_progress {
                    let spinner = ProgressBar::new_spinner();
                    spinner.set_style(Self::spinner_style());
                    spinner.set_message(format!("{} is thinking...", member.name()));
                    spinner.enable_steady_tick(Duration::from_millis(100));
                    turn.spinner = Some(spinner);
                }
            }
            DebateEvent::StatementDelta { delta, .. } => {
                Self::clear_spinner(&mut turn);
                turn.streaming = true;
                self.write(delta);
            }
            DebateEvent::StatementComplete { statement } => {
                Self::clear_spinner(&mut turn);
                // Replies that never streamed are printed whole
                if !turn.streaming {
                    self.write(&statement.content);
                }
                turn.streaming = false;
                let lookup = if statement.web_search_used == Some(true) {
                    format!(" {}", "[web search]".dimmed())
                } else {
                    String::new()
                };
                self.write(&format!("{}\n", lookup));
            }
            DebateEvent::StatusChanged { status } => {
                if let Some(line) = status_line(*status) {
                    self.write(&format!("\n{}\n", line.yellow()));
                }
            }
            DebateEvent::SessionEnded { .. } => {
                Self::clear_spinner(&mut turn);
            }
            DebateEvent::RoundEnded { .. } | DebateEvent::StatementAdded { .. } => {}
        }
    }
}

impl Drop for ConsolePresenter {
    fn drop(&mut self) {
        let turn = self.turn.get_mut().unwrap_or_else(|e| e.into_inner());
        Self::clear_spinner(turn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use committee_domain::{ModelSelector, Participant, ParticipantSpec, Statement};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn member() -> Participant {
        Participant::from_spec(ParticipantSpec::new(
            "Tenth Man",
            ModelSelector::copilot("gpt-5-mini"),
            Role::Contrarian,
        ))
    }

    #[test]
    fn test_streams_deltas_in_order() {
        let buffer = Buffer::default();
        let presenter = ConsolePresenter::with_writer(Box::new(buffer.clone()), false);
        let statement = Statement::new(&member(), 1).finalize("No. Too risky.");

        presenter.on_event(&DebateEvent::RoundStarted { round: 1 });
        presenter.on_event(&DebateEvent::MemberSpeaking {
            member: member(),
            round: 1,
        });
        presenter.on_event(&DebateEvent::delta(&statement, "No. "));
        presenter.on_event(&DebateEvent::delta(&statement, "Too risky."));
        presenter.on_event(&DebateEvent::StatementComplete {
            statement: statement.clone().with_web_search_used(true),
        });

        let text = buffer.text();
        assert!(text.contains("Round 1"));
        assert!(text.contains("Tenth Man"));
        assert!(text.contains("gpt-5-mini"));
        assert!(text.contains("No. Too risky."));
        assert!(text.contains("[web search]"));
        // Content is not printed twice
        assert_eq!(text.matches("Too risky.").count(), 1);
    }

    #[test]
    fn test_prints_whole_statement_without_deltas() {
        let buffer = Buffer::default();
        let presenter = ConsolePresenter::with_writer(Box::new(buffer.clone()), false);
        presenter.on_event(&DebateEvent::MemberSpeaking {
            member: member(),
            round: 2,
        });
        presenter.on_event(&DebateEvent::StatementComplete {
            statement: Statement::new(&member(), 2).finalize("Whole reply"),
        });
        assert!(buffer.text().contains("Whole reply"));
    }

    #[test]
    fn test_status_lines() {
        let buffer = Buffer::default();
        let presenter = ConsolePresenter::with_writer(Box::new(buffer.clone()), false);
        presenter.on_event(&DebateEvent::StatusChanged {
            status: DebateStatus::Debating,
        });
        presenter.on_event(&DebateEvent::StatusChanged {
            status: DebateStatus::Summarizing,
        });
        let text = buffer.text();
        assert!(text.contains("recorder is summarizing"));
        assert!(!text.contains("debating"));
    }
}
