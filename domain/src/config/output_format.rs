//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished debate is rendered for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every round, the summary and the verdict
    Full,
    /// Only the adjudicator's verdict (falls back to the summary)
    #[default]
    Verdict,
    /// The final snapshot as JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "verdict" => Ok(Self::Verdict),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_verdict() {
        assert_eq!(OutputFormat::default(), OutputFormat::Verdict);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&OutputFormat::Full).unwrap(), "\"full\"");
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Verdict".parse::<OutputFormat>().unwrap(), OutputFormat::Verdict);
        assert!("synthesis".parse::<OutputFormat>().is_err());
    }
}
