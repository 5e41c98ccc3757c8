//! JSON-RPC protocol types for Copilot CLI communication.
//!
//! - **Requests**: client → CLI (`session.create`, `session.send`, `session.destroy`)
//! - **Responses**: CLI → client (result or error)
//! - **Notifications**: CLI → client (`session.event` carrying deltas, `session.idle`, ...)
//! - **Incoming requests**: CLI → client (`tool.call`), which this client always rejects

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    REQUEST_ID.fetch_add(1, Ordering::SeqCst)
}

/// JSON-RPC request
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    /// Creates a new JSON-RPC request with an auto-generated ID.
    pub fn new(method: impl Into<String>, params: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id: next_id(),
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC response
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Option<u64>,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// Notification from server
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcNotification {
    pub method: String,
    pub params: Option<serde_json::Value>,
}

/// Standing instruction attached to a session.
///
/// `mode: "append"` keeps the CLI's own system prompt and adds ours after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemMessage {
    pub mode: &'static str,
    pub content: String,
}

impl SystemMessage {
    pub fn append(content: impl Into<String>) -> Self {
        Self {
            mode: "append",
            content: content.into(),
        }
    }
}

/// Session creation parameters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionParams {
    pub model: String,
    pub streaming: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_message: Option<SystemMessage>,
    /// Built-in CLI tools the session may use; omitted when lookup is off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_tools: Option<Vec<String>>,
}

impl CreateSessionParams {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            streaming: true,
            system_message: None,
            available_tools: None,
        }
    }

    pub fn with_system_message(mut self, content: impl Into<String>) -> Self {
        self.system_message = Some(SystemMessage::append(content));
        self
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tools: Vec<String> = tools.into_iter().map(Into::into).collect();
        self.available_tools = (!tools.is_empty()).then_some(tools);
        self
    }
}

/// Send parameters (for `session.send`)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendParams {
    pub session_id: String,
    pub prompt: String,
}

/// Parameters for `session.destroy`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestroyParams {
    pub session_id: String,
}

/// Parameters of an incoming `tool.call` request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallParams {
    pub session_id: String,
    pub tool_name: String,
}

/// JSON-RPC response sent from client → CLI.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponseOut {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub result: serde_json::Value,
}

impl JsonRpcResponseOut {
    pub fn new(id: u64, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result,
        }
    }

    /// Reply to a `tool.call` telling the model the tool is unavailable.
    pub fn tool_rejected(id: u64, reason: &str) -> Self {
        Self::new(
            id,
            serde_json::json!({
                "textResultForLlm": reason,
                "resultType": "error",
            }),
        )
    }
}
