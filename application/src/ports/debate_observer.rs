//! Debate observer port
//!
//! Observers receive every [`DebateEvent`] synchronously, in emission order.
//! Presentation (console, JSONL log) implements this trait.

use committee_domain::DebateEvent;

/// Callback for debate events
pub trait DebateObserver: Send + Sync {
    fn on_event(&self, event: &DebateEvent);
}

impl<F> DebateObserver for F
where
    F: Fn(&DebateEvent) + Send + Sync,
{
    fn on_event(&self, event: &DebateEvent) {
        self(event)
    }
}

/// No-op observer
pub struct NoObserver;

impl DebateObserver for NoObserver {
    fn on_event(&self, _event: &DebateEvent) {}
}
