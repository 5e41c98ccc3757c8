//! Prompt domain
//!
//! Turn prompts and session instructions for each stage of a debate.

pub mod catalog;
pub mod role;
mod template;

pub use catalog::named_role_prompt;
pub use role::{DEFAULT_RESPONSE_LANGUAGE, generic_role_prompt, role_instruction};
pub use template::{DebatePromptTemplate, OPENING_MARKER, SUMMARY_BLOCK_LABEL};
