//! Copilot session management.
//!
//! [`CopilotSession`] implements [`ConversationSession`] on top of a routed
//! [`SessionChannel`]. Each `send_streaming` call owns the channel for the
//! duration of the turn and pumps CLI events into a [`StreamHandle`].

use crate::copilot::error::Result;
use crate::copilot::protocol::SendParams;
use crate::copilot::router::{MessageRouter, RoutedMessage, SessionChannel};
use crate::copilot::transport::{TurnAccumulator, TurnStep};
use async_trait::async_trait;
use committee_application::{ConversationSession, GatewayError, StreamEvent, StreamHandle};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, mpsc};
use tracing::{debug, info, warn};

/// An open conversation with one participant's model.
pub struct CopilotSession {
    router: Arc<MessageRouter>,
    session_id: String,
    channel: Arc<Mutex<SessionChannel>>,
}

impl CopilotSession {
    pub fn new(channel: SessionChannel) -> Self {
        info!("Copilot session ready: {}", channel.session_id());
        Self {
            router: Arc::clone(channel.router()),
            session_id: channel.session_id().to_string(),
            channel: Arc::new(Mutex::new(channel)),
        }
    }

    /// Send a prompt; the channel stays locked until the turn ends.
    pub async fn ask_streaming(&self, prompt: &str) -> Result<mpsc::UnboundedReceiver<StreamEvent>> {
        let channel = Arc::clone(&self.channel).lock_owned().await;
        debug!("Sending to session {} ({} bytes)", self.session_id, prompt.len());

        let result = self
            .router
            .call(
                "session.send",
                SendParams {
                    session_id: self.session_id.clone(),
                    prompt: prompt.to_string(),
                },
            )
            .await?;
        debug!("session.send response: {}", result);

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(pump_turn(channel, tx));
        Ok(rx)
    }
}

/// Forward one turn's events until `session.idle`, an error, or router shutdown.
async fn pump_turn(mut channel: OwnedMutexGuard<SessionChannel>, tx: mpsc::UnboundedSender<StreamEvent>) {
    let mut turn = TurnAccumulator::new();
    loop {
        let message = match channel.recv().await {
            Ok(message) => message,
            Err(e) => {
                let _ = tx.send(StreamEvent::Error(e.to_string()));
                return;
            }
        };
        match message {
            RoutedMessage::SessionEvent { event_type, event } => {
                match turn.apply(&event_type, &event) {
                    TurnStep::Continue(Some(stream_event)) => {
                        // Keep draining even if the reader went away, so the
                        // next turn does not see this turn's tail.
                        let _ = tx.send(stream_event);
                    }
                    TurnStep::Continue(None) => {}
                    TurnStep::Completed(text) => {
                        let _ = tx.send(StreamEvent::Completed(text));
                        return;
                    }
                    TurnStep::Failed(message) => {
                        let _ = tx.send(StreamEvent::Error(message));
                        return;
                    }
                }
            }
            RoutedMessage::ToolCall { request_id, params } => {
                let router = Arc::clone(channel.router());
                if let Err(e) = router.reject_tool_call(request_id, &params).await {
                    warn!("Failed to answer tool.call: {}", e);
                }
            }
        }
    }
}

#[async_trait]
impl ConversationSession for CopilotSession {
    fn session_id(&self) -> &str {
        &self.session_id
    }

    async fn send_streaming(&self, prompt: &str) -> std::result::Result<StreamHandle, GatewayError> {
        let rx = self.ask_streaming(prompt).await.map_err(GatewayError::from)?;
        Ok(StreamHandle::new(rx))
    }

    async fn destroy(&self) -> std::result::Result<(), GatewayError> {
        let outcome = self.router.destroy_session(&self.session_id).await;
        self.router.deregister_session(&self.session_id);
        outcome.map_err(GatewayError::from)
    }
}
