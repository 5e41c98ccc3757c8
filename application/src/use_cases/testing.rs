//! Scripted gateway and session mocks shared by the use case tests

use crate::ports::conversation_gateway::{
    ConversationGateway, ConversationSession, GatewayError, StreamEvent, StreamHandle,
};
use async_trait::async_trait;
use committee_domain::Participant;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Debug, Clone)]
pub(crate) struct CreatedSession {
    pub session_id: String,
    pub participant: String,
    pub instruction: String,
    pub tools_enabled: bool,
}

#[derive(Default)]
pub(crate) struct MockGateway {
    pub(crate) next_id: AtomicUsize,
    /// Zero-based creation attempt that fails
    pub fail_create_at: Option<usize>,
    /// Participant whose turns fail
    pub fail_turn_for: Option<String>,
    /// Participant whose turns invoke web_search
    pub search_for: Option<String>,
    /// Participant whose turns stream a preamble before the reply
    pub preamble_for: Option<String>,
    /// Participant whose streams close without completing
    pub truncate_turn_for: Option<String>,
    /// Participant whose turns wait for a notification before replying
    pub hold_turn_for: Option<(String, Arc<Notify>)>,
    pub created: Mutex<Vec<CreatedSession>>,
    pub destroyed: Arc<Mutex<Vec<String>>>,
    /// `create:<id>` and `destroy:<id>` entries in the order they happened
    pub lifecycle: Arc<Mutex<Vec<String>>>,
    pub prompts: Arc<Mutex<Vec<(String, String)>>>,
    pub shutdowns: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_create_at(index: usize) -> Self {
        Self {
            fail_create_at: Some(index),
            ..Self::default()
        }
    }

    pub fn created_ids(&self) -> Vec<String> {
        self.created
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.session_id.clone())
            .collect()
    }

    pub fn destroyed_ids(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }

    pub fn lifecycle(&self) -> Vec<String> {
        self.lifecycle.lock().unwrap().clone()
    }

    pub fn prompts_for(&self, participant: &str) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == participant)
            .map(|(_, prompt)| prompt.clone())
            .collect()
    }
}

#[async_trait]
impl ConversationGateway for MockGateway {
    async fn create_session(
        &self,
        participant: &Participant,
        system_instruction: &str,
        tools_enabled: bool,
    ) -> Result<Box<dyn ConversationSession>, GatewayError> {
        let index = self.next_id.fetch_add(1, Ordering::SeqCst);
        if self.fail_create_at == Some(index) {
            return Err(GatewayError::SessionError(format!(
                "cannot create session for {}",
                participant.name()
            )));
        }

        let session_id = format!("mock-{}", index);
        self.created.lock().unwrap().push(CreatedSession {
            session_id: session_id.clone(),
            participant: participant.name().to_string(),
            instruction: system_instruction.to_string(),
            tools_enabled,
        });
        self.lifecycle
            .lock()
            .unwrap()
            .push(format!("create:{}", session_id));

        let name = participant.name();
        Ok(Box::new(MockSession {
            session_id,
            participant: participant.name().to_string(),
            turns: AtomicUsize::new(0),
            fail_turns: self.fail_turn_for.as_deref() == Some(participant.name()),
            use_search: self.search_for.as_deref() == Some(name),
            preamble: self.preamble_for.as_deref() == Some(name),
            truncate: self.truncate_turn_for.as_deref() == Some(name),
            hold: self
                .hold_turn_for
                .as_ref()
                .filter(|(name, _)| name == participant.name())
                .map(|(_, gate)| Arc::clone(gate)),
            destroyed: Arc::clone(&self.destroyed),
            lifecycle: Arc::clone(&self.lifecycle),
            prompts: Arc::clone(&self.prompts),
        }))
    }

    async fn shutdown(&self) -> Result<(), GatewayError> {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub(crate) struct MockSession {
    session_id: String,
    participant: String,
    turns: AtomicUsize,
    fail_turns: bool,
    use_search: bool,
    preamble: bool,
    truncate: bool,
    hold: Option<Arc<Notify>>,
    destroyed: Arc<Mutex<Vec<String>>>,
    lifecycle: Arc<Mutex<Vec<String>>>,
    prompts: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl ConversationSession for MockSession {
    fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Replies `"<name> reply <n>"` in two deltas.
    ///
    /// With a preamble the stream opens with `"Let me check. "` and the
    /// completion carries the reply alone.
    async fn send_streaming(&self, prompt: &str) -> Result<StreamHandle, GatewayError> {
        self.prompts
            .lock()
            .unwrap()
            .push((self.participant.clone(), prompt.to_string()));
        if let Some(gate) = &self.hold {
            gate.notified().await;
        }
        if self.fail_turns {
            return Ok(StreamHandle::from_events([StreamEvent::Error(
                "model unavailable".to_string(),
            )]));
        }

        let turn = self.turns.fetch_add(1, Ordering::SeqCst) + 1;
        let mut events = Vec::new();
        if self.preamble {
            events.push(StreamEvent::Delta("Let me check. ".to_string()));
        }
        events.push(StreamEvent::Delta(format!("{} ", self.participant)));
        if self.use_search {
            events.push(StreamEvent::ToolInvoked("web_search".to_string()));
        }
        events.push(StreamEvent::Delta(format!("reply {}", turn)));
        if self.truncate {
            return Ok(StreamHandle::from_events(events));
        }
        let reply = if self.preamble {
            format!("{} reply {}", self.participant, turn)
        } else {
            String::new()
        };
        events.push(StreamEvent::Completed(reply));
        Ok(StreamHandle::from_events(events))
    }

    async fn destroy(&self) -> Result<(), GatewayError> {
        self.destroyed.lock().unwrap().push(self.session_id.clone());
        self.lifecycle
            .lock()
            .unwrap()
            .push(format!("destroy:{}", self.session_id));
        Ok(())
    }
}
