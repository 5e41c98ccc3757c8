//! Presentation-level configuration
//!
//! Resolves how the console renders a debate from CLI flags and the `[output]`
//! section of the config file. CLI flags win.

use committee_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
    /// Stream the debate live instead of printing only the result
    pub live: bool,
    /// Show a spinner while waiting for a speaker
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            live: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    pub fn resolve(
        cli_format: Option<OutputFormat>,
        file_format: Option<OutputFormat>,
        file_color: bool,
        no_color: bool,
        quiet: bool,
    ) -> Self {
        Self {
            format: cli_format.or(file_format).unwrap_or_default(),
            color: file_color && !no_color,
            // JSON goes to stdout on its own
            live: !quiet && cli_format.or(file_format) != Some(OutputFormat::Json),
            show_progress: !quiet,
        }
    }
}
