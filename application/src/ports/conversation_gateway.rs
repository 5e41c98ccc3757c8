//! Conversation gateway port
//!
//! Defines how the application layer talks to the conversational backend.
//! One [`ConversationSession`] is created per participant and lives for the
//! whole debate.

use async_trait::async_trait;
use committee_domain::Participant;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Transport closed")]
    TransportClosed,

    #[error("Other error: {0}")]
    Other(String),
}

/// One event of a streamed turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Incremental text
    Delta(String),
    /// The backend invoked a tool while composing the reply
    ToolInvoked(String),
    /// The turn finished with this reply.
    ///
    /// Deltas are for display only; an empty reply means the deltas are the reply.
    Completed(String),
    /// The turn failed
    Error(String),
}

/// Tools that count as external lookup
pub const LOOKUP_TOOLS: [&str; 2] = ["web_search", "web_fetch"];

/// Handle for receiving the events of one streamed turn.
pub struct StreamHandle {
    receiver: mpsc::UnboundedReceiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::UnboundedReceiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Build a handle that replays a fixed list of events.
    pub fn from_events(events: impl IntoIterator<Item = StreamEvent>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        for event in events {
            // The receiver is held right here, so this cannot fail
            let _ = tx.send(event);
        }
        Self::new(rx)
    }

    /// Next event, or `None` once the sender side is gone.
    pub async fn recv(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }

    /// Consume the stream and return the turn's reply.
    pub async fn collect_text(mut self) -> Result<String, GatewayError> {
        let mut streamed = String::new();
        while let Some(event) = self.recv().await {
            match event {
                StreamEvent::Delta(chunk) => streamed.push_str(&chunk),
                StreamEvent::ToolInvoked(_) => {}
                StreamEvent::Completed(reply) if reply.is_empty() => return Ok(streamed),
                StreamEvent::Completed(reply) => return Ok(reply),
                StreamEvent::Error(e) => return Err(GatewayError::RequestFailed(e)),
            }
        }
        Err(GatewayError::RequestFailed(STREAM_ENDED_EARLY.to_string()))
    }
}

/// Failure reported when a stream closes without completing its turn
pub const STREAM_ENDED_EARLY: &str = "stream ended before completion";

/// Gateway to the conversational backend
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ConversationGateway: Send + Sync {
    /// Create a session for `participant` with a standing system instruction.
    ///
    /// When `tools_enabled` is set the session may use the external-lookup tools.
    async fn create_session(
        &self,
        participant: &Participant,
        system_instruction: &str,
        tools_enabled: bool,
    ) -> Result<Box<dyn ConversationSession>, GatewayError>;

    /// Release the shared backend connection.
    async fn shutdown(&self) -> Result<(), GatewayError> {
        Ok(())
    }
}

/// A live conversation with one participant's model
#[async_trait]
pub trait ConversationSession: Send + Sync {
    /// Backend identifier of this session
    fn session_id(&self) -> &str;

    /// Send a prompt and stream the reply.
    async fn send_streaming(&self, prompt: &str) -> Result<StreamHandle, GatewayError>;

    /// Release the session on the backend.
    async fn destroy(&self) -> Result<(), GatewayError>;
}
