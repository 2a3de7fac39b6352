//! # Dispatcher Resolution
//!
//! Pure resolution of the fallback path: given the current diamond storage
//! and an incoming selector, decide where (or whether) the call proceeds.
//! Forwarding itself happens at the service layer; keeping the decision pure
//! makes the pause gating trivially auditable.
//!
//! Pausing is a single flag consulted before the registry lookup, never a
//! bulk rewrite of routing entries, so halting all traffic is O(1).

use crate::domain::storage::DiamondStorage;
use crate::domain::value_objects::{Address, Selector};

/// Outcome of resolving an incoming selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Forward the call to this facet.
    Forward(Address),
    /// Routing is halted and the selector is not on the emergency
    /// allow-list; the call must fail with `DiamondIsPaused`.
    Paused,
    /// No implementation registered; the call must fail with
    /// `FunctionDoesNotExist`.
    NotFound,
}

/// Resolves a selector against the registry, honoring the pause gate.
///
/// While paused, only selectors registered to the emergency governance facet
/// remain routable, so the ability to unpause is never blocked.
#[must_use]
pub fn resolve(storage: &DiamondStorage, selector: Selector) -> Resolution {
    match storage.registry.facet_of(selector) {
        Some(facet) => {
            if storage.paused && facet != storage.emergency_facet {
                Resolution::Paused
            } else {
                Resolution::Forward(facet)
            }
        }
        None => {
            // Unregistered selectors report NotFound even while paused, so
            // "system halted" and "never existed" stay distinguishable.
            Resolution::NotFound
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
