//! Participant role value object

use serde::{Deserialize, Serialize};

/// Role a participant plays in a debate (Value Object)
///
/// Role-specific behavior (turn order, prompts, phases) is always dispatched
/// with a `match` on this tag. The legacy names from earlier roster files
/// (`committee`, `tenth_man`, `secretary`, `arbiter`) are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Argues in favor across rounds
    #[serde(alias = "committee")]
    Proponent,
    /// Must dissent across rounds; always speaks last within a round
    #[serde(alias = "tenth_man")]
    Contrarian,
    /// Writes a single synthesis once the rounds are over
    #[serde(alias = "secretary")]
    Recorder,
    /// Gives the final verdict after the recorder phase
    #[serde(alias = "arbiter")]
    Adjudicator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Proponent => "proponent",
            Role::Contrarian => "contrarian",
            Role::Recorder => "recorder",
            Role::Adjudicator => "adjudicator",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Proponent => "Proponent",
            Role::Contrarian => "Contrarian",
            Role::Recorder => "Recorder",
            Role::Adjudicator => "Adjudicator",
        }
    }

    /// Whether this role takes turns inside the debate rounds
    pub fn is_debater(&self) -> bool {
        matches!(self, Role::Proponent | Role::Contrarian)
    }

    /// Position within a round; lower speaks first
    pub fn speaking_rank(&self) -> u8 {
        match self {
            Role::Proponent => 0,
            Role::Contrarian => 1,
            Role::Recorder | Role::Adjudicator => u8::MAX,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proponent" | "committee" | "pro" => Ok(Role::Proponent),
            "contrarian" | "tenth_man" | "con" => Ok(Role::Contrarian),
            "recorder" | "secretary" => Ok(Role::Recorder),
            "adjudicator" | "arbiter" | "judge" => Ok(Role::Adjudicator),
            other => Err(format!(
                "unknown role '{}' (expected proponent, contrarian, recorder or adjudicator)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_snake_case() {
        let json = serde_json::to_string(&Role::Adjudicator).unwrap();
        assert_eq!(json, "\"adjudicator\"");
    }

    #[test]
    fn test_deserialize_legacy_aliases() {
        let role: Role = serde_json::from_str("\"tenth_man\"").unwrap();
        assert_eq!(role, Role::Contrarian);
        let role: Role = serde_json::from_str("\"secretary\"").unwrap();
        assert_eq!(role, Role::Recorder);
        let role: Role = serde_json::from_str("\"arbiter\"").unwrap();
        assert_eq!(role, Role::Adjudicator);
        let role: Role = serde_json::from_str("\"committee\"").unwrap();
        assert_eq!(role, Role::Proponent);
    }

    #[test]
    fn test_only_proponent_and_contrarian_debate() {
        assert!(Role::Proponent.is_debater());
        assert!(Role::Contrarian.is_debater());
        assert!(!Role::Recorder.is_debater());
        assert!(!Role::Adjudicator.is_debater());
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!("Judge".parse::<Role>(), Ok(Role::Adjudicator));
        assert!("moderator".parse::<Role>().is_err());
    }
}
