//! Copilot CLI adapter
//!
//! Implements [`ConversationGateway`](committee_application::ConversationGateway)
//! over the Copilot CLI's JSON-RPC server mode.

pub mod error;
pub mod gateway;
pub mod protocol;
pub mod router;
pub mod session;
pub mod transport;

pub use error::CopilotError;
pub use gateway::CopilotGateway;
pub use router::MessageRouter;
pub use session::CopilotSession;
