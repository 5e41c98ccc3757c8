//! Console output formatter for debate results

use crate::output::formatter::OutputFormatter;
use crate::progress::presenter::role_label;
use colored::Colorize;
use committee_domain::DebateSnapshot;

/// Formats finished debates for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete debate
    pub fn format(snapshot: &DebateSnapshot) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("AI Committee Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n\n", "Topic:".cyan().bold(), snapshot.topic));
        output.push_str(&format!(
            "{} {}\n",
            "Members:".cyan().bold(),
            snapshot
                .members
                .iter()
                .map(|m| format!("{} ({})", m.name(), m.role().display_name()))
                .collect::<Vec<_>>()
                .join(", ")
        ));

        let last_round = snapshot
            .round_statements()
            .map(|s| s.round)
            .max()
            .unwrap_or(0);
        for round in 1..=last_round {
            output.push_str(&Self::section_header(&format!("Round {}", round)));
            for statement in snapshot.round_statements().filter(|s| s.round == round) {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    role_label(statement.role, &format!("── {} ──", statement.participant_name)),
                    statement.content
                ));
            }
        }

        if let Some(summary) = &snapshot.summary {
            output.push_str(&Self::section_header("Recorder's Summary"));
            output.push_str(&format!("\n{}\n", summary));
        }

        output.push_str(&Self::section_header("Verdict"));
        output.push_str(&format!(
            "\n{}\n",
            snapshot.verdict.as_deref().unwrap_or("(no verdict was reached)")
        ));

        output.push_str(&Self::footer());
        output
    }

    /// Format as pretty JSON
    pub fn format_json(snapshot: &DebateSnapshot) -> String {
        serde_json::to_string_pretty(snapshot).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    /// Verdict only, falling back to the summary when there is none
    pub fn format_verdict_only(snapshot: &DebateSnapshot) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{}\n\n", "=== Verdict ===".cyan().bold()));
        output.push_str(&format!("{} {}\n\n", "Topic:".bold(), snapshot.topic));

        match (&snapshot.verdict, &snapshot.summary) {
            (Some(verdict), _) => output.push_str(verdict),
            (None, Some(summary)) => {
                output.push_str(&format!("{}\n", "No verdict; recorder's summary:".dimmed()));
                output.push_str(summary);
            }
            (None, None) => output.push_str(&"(no verdict was reached)".dimmed().to_string()),
        }
        output.push('\n');

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, snapshot: &DebateSnapshot) -> String {
        Self::format(snapshot)
    }

    fn format_json(&self, snapshot: &DebateSnapshot) -> String {
        Self::format_json(snapshot)
    }

    fn format_verdict(&self, snapshot: &DebateSnapshot) -> String {
        Self::format_verdict_only(snapshot)
    }
}
