//! Participant session adapter
//!
//! Maps each participant of the active debate to its conversation session
//! and turns a streamed reply into a finalized turn.

use crate::ports::conversation_gateway::{
    ConversationGateway, ConversationSession, GatewayError, LOOKUP_TOOLS, STREAM_ENDED_EARLY,
    StreamEvent,
};
use committee_domain::{Participant, ParticipantId, role_instruction};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Result of one completed turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutput {
    pub text: String,
    pub web_search_used: bool,
}

/// The conversation sessions of one debate, keyed by participant
pub struct ParticipantSessions {
    sessions: Mutex<HashMap<ParticipantId, Arc<dyn ConversationSession>>>,
}

impl ParticipantSessions {
    /// Create one session per participant.
    ///
    /// If any creation fails, the sessions created so far are destroyed and
    /// the error is returned.
    pub async fn create_all<G: ConversationGateway + ?Sized>(
        gateway: &G,
        members: &[Participant],
        web_search_enabled: bool,
        response_language: &str,
    ) -> Result<Self, GatewayError> {
        let mut created: Vec<(ParticipantId, Arc<dyn ConversationSession>)> =
            Vec::with_capacity(members.len());

        for participant in members {
            let instruction = role_instruction(participant, web_search_enabled, response_language);
            match gateway
                .create_session(participant, &instruction, web_search_enabled)
                .await
            {
                Ok(session) => {
                    debug!(
                        participant = participant.name(),
                        session_id = session.session_id(),
                        "Session created"
                    );
                    created.push((participant.id().clone(), Arc::from(session)));
                }
                Err(e) => {
                    warn!(
                        participant = participant.name(),
                        "Session creation failed, releasing {} created session(s): {}",
                        created.len(),
                        e
                    );
                    for (_, session) in created {
                        destroy_quietly(session.as_ref()).await;
                    }
                    return Err(e);
                }
            }
        }

        info!("Created {} participant session(s)", created.len());
        Ok(Self {
            sessions: Mutex::new(created.into_iter().collect()),
        })
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run one turn for `participant`, forwarding every delta to `on_delta`.
    pub async fn converse(
        &self,
        participant: &ParticipantId,
        prompt: &str,
        mut on_delta: impl FnMut(&str),
    ) -> Result<TurnOutput, GatewayError> {
        let session = self.lock().get(participant).cloned().ok_or_else(|| {
            GatewayError::SessionError(format!("no session for participant {}", participant))
        })?;

        let mut handle = session.send_streaming(prompt).await?;
        let mut streamed = String::new();
        let mut web_search_used = false;

        while let Some(event) = handle.recv().await {
            match event {
                StreamEvent::Delta(chunk) => {
                    on_delta(&chunk);
                    streamed.push_str(&chunk);
                }
                StreamEvent::ToolInvoked(tool) => {
                    debug!(participant = %participant, tool = %tool, "Tool invoked");
                    if LOOKUP_TOOLS.contains(&tool.as_str()) {
                        web_search_used = true;
                    }
                }
                StreamEvent::Completed(reply) => {
                    let text = if reply.is_empty() { streamed } else { reply };
                    return Ok(TurnOutput {
                        text,
                        web_search_used,
                    });
                }
                StreamEvent::Error(e) => return Err(GatewayError::RequestFailed(e)),
            }
        }

        warn!(participant = %participant, "Stream closed before the turn completed");
        Err(GatewayError::RequestFailed(STREAM_ENDED_EARLY.to_string()))
    }

    /// Destroy every session. Failures are logged and skipped.
    ///
    /// Sessions are removed before they are destroyed, so each one is
    /// destroyed at most once even if this is called repeatedly.
    pub async fn destroy_all(&self) {
        let drained: Vec<_> = self.lock().drain().collect();
        if drained.is_empty() {
            return;
        }
        debug!("Destroying {} participant session(s)", drained.len());
        for (_, session) in drained {
            destroy_quietly(session.as_ref()).await;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ParticipantId, Arc<dyn ConversationSession>>> {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn destroy_quietly(session: &dyn ConversationSession) {
    if let Err(e) = session.destroy().await {
        warn!(
            session_id = session.session_id(),
            "Failed to destroy session: {}", e
        );
    }
}
