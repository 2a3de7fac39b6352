//! # In-Memory Event Publisher
//!
//! Captures published events in order so tests and local tooling can audit
//! exactly what a sequence of operations emitted.

use crate::events::DiamondEvent;
use crate::ports::outbound::EventPublisher;
use std::sync::RwLock;

/// Event journal backed by a process-local vector.
#[derive(Default)]
pub struct InMemoryEventPublisher {
    journal: RwLock<Vec<DiamondEvent>>,
}

impl InMemoryEventPublisher {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all captured events, in publication order.
    #[must_use]
    pub fn events(&self) -> Vec<DiamondEvent> {
        self.journal
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of captured events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.journal
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing was published yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventPublisher for InMemoryEventPublisher {
    fn publish(&self, event: DiamondEvent) {
        self.journal
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
