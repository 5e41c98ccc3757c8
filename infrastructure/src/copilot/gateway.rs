//! Copilot conversation gateway implementation

use crate::copilot::error::CopilotError;
use crate::copilot::protocol::CreateSessionParams;
use crate::copilot::router::MessageRouter;
use crate::copilot::session::CopilotSession;
use async_trait::async_trait;
use committee_application::{
    ConversationGateway, ConversationSession, GatewayError, LOOKUP_TOOLS,
};
use committee_domain::Participant;
use std::sync::Arc;
use tracing::{debug, info};

/// Default executable name of the Copilot CLI
pub const DEFAULT_COPILOT_COMMAND: &str = "copilot";

/// Arguments passed after `--server`; participants get their instructions from us only.
const SERVER_ARGS: &[&str] = &["--no-custom-instructions"];

/// [`ConversationGateway`] backed by one Copilot CLI server process
pub struct CopilotGateway {
    router: Arc<MessageRouter>,
}

impl CopilotGateway {
    /// Spawn `copilot --server` and connect to it
    pub async fn new() -> Result<Self, GatewayError> {
        Self::with_command(DEFAULT_COPILOT_COMMAND).await
    }

    /// Spawn a gateway using a custom CLI executable
    pub async fn with_command(cmd: &str) -> Result<Self, GatewayError> {
        let args: Vec<String> = SERVER_ARGS.iter().map(|a| a.to_string()).collect();
        let router = MessageRouter::spawn(cmd, &args)
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        info!("CopilotGateway initialized");
        Ok(Self { router })
    }

    /// Wrap an existing router
    pub fn with_router(router: Arc<MessageRouter>) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &Arc<MessageRouter> {
        &self.router
    }
}

/// Session parameters for one participant.
pub fn session_params(
    participant: &Participant,
    system_instruction: &str,
    tools_enabled: bool,
) -> CreateSessionParams {
    let tools: &[&str] = if tools_enabled { &LOOKUP_TOOLS } else { &[] };
    CreateSessionParams::new(participant.selector().session_model_id())
        .with_system_message(system_instruction)
        .with_tools(tools.iter().copied())
}

#[async_trait]
impl ConversationGateway for CopilotGateway {
    async fn create_session(
        &self,
        participant: &Participant,
        system_instruction: &str,
        tools_enabled: bool,
    ) -> Result<Box<dyn ConversationSession>, GatewayError> {
        let params = session_params(participant, system_instruction, tools_enabled);
        debug!(
            "Creating session for {} on {}",
            participant.name(),
            params.model
        );

        let channel = self
            .router
            .create_session(params)
            .await
            .map_err(|e| match e {
                CopilotError::RpcError { .. } => GatewayError::ModelNotAvailable(format!(
                    "{}: {}",
                    participant.selector().session_model_id(),
                    e
                )),
                other => GatewayError::SessionError(other.to_string()),
            })?;

        Ok(Box::new(CopilotSession::new(channel)))
    }

    async fn shutdown(&self) -> Result<(), GatewayError> {
        info!("Shutting down Copilot CLI");
        self.router.shutdown();
        Ok(())
    }
}
