//! Logging infrastructure: structured debate event logging.
//!
//! Provides [`JsonlEventLog`], a JSONL file writer that implements the
//! [`DebateObserver`](committee_application::DebateObserver) port.

mod jsonl_event_log;

pub use jsonl_event_log::JsonlEventLog;
