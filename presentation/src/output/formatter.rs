//! Output formatter trait

use committee_domain::{DebateSnapshot, OutputFormat};

/// Trait for formatting a finished debate
pub trait OutputFormatter {
    /// Every round, the summary and the verdict
    fn format_full(&self, snapshot: &DebateSnapshot) -> String;

    /// Format as JSON
    fn format_json(&self, snapshot: &DebateSnapshot) -> String;

    /// Verdict only (concise output)
    fn format_verdict(&self, snapshot: &DebateSnapshot) -> String;

    fn render(&self, snapshot: &DebateSnapshot, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format_full(snapshot),
            OutputFormat::Verdict => self.format_verdict(snapshot),
            OutputFormat::Json => self.format_json(snapshot),
        }
    }
}
