//! Error types for the Copilot adapter

use committee_application::GatewayError;
use thiserror::Error;

/// Result type alias for Copilot operations
pub type Result<T> = std::result::Result<T, CopilotError>;

/// Errors that can occur when communicating with Copilot CLI
#[derive(Error, Debug)]
pub enum CopilotError {
    #[error("Failed to spawn Copilot process: {0}")]
    SpawnError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("JSON-RPC error (code {code}): {message}")]
    RpcError { code: i64, message: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Transport closed")]
    TransportClosed,

    #[error("Router stopped: the Copilot CLI connection is gone")]
    RouterStopped,

    #[error("Timeout: {0}")]
    Timeout(String),
}

impl From<CopilotError> for GatewayError {
    fn from(e: CopilotError) -> Self {
        match e {
            CopilotError::SpawnError(_) => GatewayError::ConnectionError(e.to_string()),
            CopilotError::TransportClosed | CopilotError::RouterStopped => {
                GatewayError::TransportClosed
            }
            CopilotError::Timeout(_) => GatewayError::Timeout,
            CopilotError::RpcError { .. } => GatewayError::RequestFailed(e.to_string()),
            CopilotError::SerializationError(_) | CopilotError::UnexpectedResponse(_) => {
                GatewayError::Other(e.to_string())
            }
        }
    }
}
