//! Application layer for ai-committee
//!
//! This crate contains the debate controller, the event bus and the port
//! definitions adapters implement. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    conversation_gateway::{
        ConversationGateway, ConversationSession, GatewayError, LOOKUP_TOOLS, StreamEvent,
        StreamHandle,
    },
    debate_observer::{DebateObserver, NoObserver},
};
pub use use_cases::debate_controller::{ControllerOptions, DebateController, DebateError};
pub use use_cases::event_bus::EventBus;
pub use use_cases::participant_sessions::{ParticipantSessions, TurnOutput};
