//! Synchronous fan-out of debate events to observers

use crate::ports::debate_observer::DebateObserver;
use committee_domain::DebateEvent;
use std::sync::{Arc, RwLock};
use tracing::trace;

/// Ordered list of observers; every emitted event reaches all of them.
#[derive(Default)]
pub struct EventBus {
    observers: RwLock<Vec<Arc<dyn DebateObserver>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, observer: Arc<dyn DebateObserver>) {
        self.observers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(observer);
    }

    /// Deliver `event` to every observer, in subscription order.
    pub fn emit(&self, event: &DebateEvent) {
        if !event.is_streaming() {
            trace!(event = event.event_type(), "Emitting debate event");
        }
        // Snapshot the list so an observer may subscribe without deadlocking
        let observers = self
            .observers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        for observer in observers {
            observer.on_event(event);
        }
    }

    pub fn clear(&self) {
        self.observers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    pub fn len(&self) -> usize {
        self.observers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
