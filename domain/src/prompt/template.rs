//! Prompt templates for the debate flow
//!
//! Every function here is pure: the same inputs always render the same text.

use crate::debate::statement::Statement;
use crate::debate::transcript::is_visible_to;
use crate::participant::entities::Participant;

/// Phrase that marks the opening prompt of the first round
pub const OPENING_MARKER: &str = "This is the opening of round";

/// Label of the recorder summary block inside the verdict prompt
pub const SUMMARY_BLOCK_LABEL: &str = "Recorder's summary:";

/// Templates for generating the per-turn user prompts
pub struct DebatePromptTemplate;

impl DebatePromptTemplate {
    /// Prompt for a debater's turn.
    ///
    /// The first speaker of round 1 gets the opening template. Everyone else
    /// gets the continuation template carrying every statement visible to
    /// them: earlier rounds, plus same-round statements by other speakers.
    pub fn opening_or_continuation(
        participant: &Participant,
        topic: &str,
        round: u32,
        transcript: &[Statement],
    ) -> String {
        let history: Vec<String> = transcript
            .iter()
            .filter(|s| is_visible_to(s, participant.id(), round))
            .map(Statement::transcript_line)
            .collect();

        if round == 1 && history.is_empty() {
            return format!(
                r#"Topic: {}

{} {} of the debate. Please share your view on this topic."#,
                topic, OPENING_MARKER, round
            );
        }

        format!(
            r#"Topic: {}

This is round {} of the debate. The discussion so far:

{}

Based on the discussion above, share your view."#,
            topic,
            round,
            history.join("\n\n")
        )
    }

    /// Prompt for the recorder's closing summary.
    pub fn summary_prompt(topic: &str, transcript: &[Statement]) -> String {
        format!(
            r#"Topic: {}

Here is the complete debate record:

{}

Please organize the key points of this discussion, including:
1. The main positions of each side
2. The key turning points in the discussion
3. How the positions shifted over time
4. A concluding summary"#,
            topic,
            Self::render_transcript(transcript)
        )
    }

    /// Prompt for the adjudicator's final verdict.
    ///
    /// The recorder's summary is embedded as a labeled block only when one
    /// was produced.
    pub fn verdict_prompt(topic: &str, transcript: &[Statement], summary: Option<&str>) -> String {
        let mut prompt = format!(
            r#"Topic: {}

Here is the complete debate record:

{}
"#,
            topic,
            Self::render_transcript(transcript)
        );

        if let Some(summary) = summary.filter(|s| !s.trim().is_empty()) {
            prompt.push_str(&format!("\n{}\n{}\n", SUMMARY_BLOCK_LABEL, summary));
        }

        prompt.push_str(
            r#"
As the adjudicator, deliver your final ruling based on the whole discussion:
1. A combined assessment of every viewpoint
2. Your own judgment and position
3. A clear conclusion or recommendation
4. The reasoning behind your ruling"#,
        );

        prompt
    }

    fn render_transcript(transcript: &[Statement]) -> String {
        transcript
            .iter()
            .map(Statement::transcript_line)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
