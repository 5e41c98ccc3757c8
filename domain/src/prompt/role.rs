//! System instructions for participant sessions

use super::catalog::named_role_prompt;
use crate::participant::entities::Participant;
use crate::participant::role::Role;

/// Language debaters answer in when nothing else is configured.
pub const DEFAULT_RESPONSE_LANGUAGE: &str = "Traditional Chinese (繁體中文)";

/// Build the standing instruction for a participant's session.
///
/// Resolution order is the participant's own non-blank custom prompt, then a
/// persona keyed by the participant's name, then the generic block for its
/// role. Every variant starts with the shared base block.
pub fn role_instruction(participant: &Participant, web_search_enabled: bool, language: &str) -> String {
    let base = base_block(participant.name(), web_search_enabled, language);

    let specific = participant
        .custom_instruction()
        .or_else(|| named_role_prompt(participant.name()))
        .unwrap_or_else(|| generic_role_prompt(participant.role()));

    format!("{}\n\n{}", base, specific)
}

fn base_block(name: &str, web_search_enabled: bool, language: &str) -> String {
    let mut block = format!(
        "You are \"{}\", a member of an AI committee debate.\nAlways answer in {}.",
        name, language
    );
    if web_search_enabled {
        block.push_str(
            "\nYou can use web search (web_search) to look up facts, verify claims or \
             strengthen your arguments. Use it whenever you need to check data or cite \
             recent information.",
        );
    }
    block
}

/// Generic instruction for a role, used when no persona applies.
pub fn generic_role_prompt(role: Role) -> &'static str {
    match role {
        Role::Proponent => {
            r#"You are a proponent on this committee. Analyze the topic rationally and put forward supporting views and arguments.
During the debate you should:
- Offer constructive opinions
- Respond to the other members' points
- Back the arguments in favor"#
        }
        Role::Contrarian => {
            r#"You are the "tenth man" (devil's advocate). Under the tenth-man rule you must dissent.
However unanimous the others are, you must:
- Find possible gaps and risks
- Raise objections and challenges
- Question the prevailing view
- Point out problems that may have been overlooked"#
        }
        Role::Recorder => {
            r#"You are the recorder, responsible for documenting and organizing the discussion.
You need to:
- Record each side's views objectively
- Organize the key points and how they changed
- Summarize where the positions agree and differ
- Identify the turning points of the discussion"#
        }
        Role::Adjudicator => {
            r#"You are the adjudicator and give the final ruling once all discussion is over.
You need to:
- Weigh every viewpoint
- Reach a conclusion from your own judgment
- Give a clear recommendation or decision
- Explain the reasoning behind your ruling"#
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ModelSelector;
    use crate::participant::entities::{ParticipantId, ParticipantSpec};

    fn participant(spec: ParticipantSpec) -> Participant {
        Participant::new(ParticipantId::new("p"), spec)
    }

    #[test]
    fn test_generic_prompt_by_role() {
        let p = participant(ParticipantSpec::new(
            "Member 1",
            ModelSelector::default(),
            Role::Contrarian,
        ));
        let instruction = role_instruction(&p, false, DEFAULT_RESPONSE_LANGUAGE);
        assert!(instruction.contains("\"Member 1\""));
        assert!(instruction.contains(DEFAULT_RESPONSE_LANGUAGE));
        assert!(instruction.contains("tenth man"));
        assert!(!instruction.contains("web_search"));
    }

    #[test]
    fn test_web_search_encouragement() {
        let p = participant(ParticipantSpec::new(
            "Member 1",
            ModelSelector::default(),
            Role::Proponent,
        ));
        assert!(role_instruction(&p, true, "English").contains("web_search"));
    }

    #[test]
    fn test_custom_prompt_takes_precedence() {
        let p = participant(
            ParticipantSpec::new("Assumption Hunter", ModelSelector::default(), Role::Contrarian)
                .with_custom_prompt("Only ask questions."),
        );
        let instruction = role_instruction(&p, false, "English");
        assert!(instruction.ends_with("Only ask questions."));
        assert!(!instruction.contains("tenth man"));
    }

    #[test]
    fn test_blank_custom_prompt_falls_through_to_persona() {
        let p = participant(
            ParticipantSpec::new("Assumption Hunter", ModelSelector::default(), Role::Contrarian)
                .with_custom_prompt("   "),
        );
        let instruction = role_instruction(&p, false, "English");
        assert!(instruction.contains("Logic circuit breaker"));
    }
}
