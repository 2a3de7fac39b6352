//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the diamond core depends on: facet implementation lookup and
//! execution, and the audit event sink. Adapters implement these; the core
//! never knows where facet code actually lives.

use crate::domain::storage::{CallContext, ProxyState};
use crate::domain::value_objects::{Address, Bytes};
use crate::errors::FacetError;
use crate::events::DiamondEvent;
use std::sync::Arc;

// =============================================================================
// FACET HANDLER
// =============================================================================

/// The polymorphic implementation a selector resolves to.
///
/// Handlers execute against a mutable handle to the proxy's own store — the
/// explicit shared-state-ownership model replacing delegated execution. The
/// original caller identity arrives unchanged in the context, and a
/// handler's failure is relayed verbatim to the original caller.
pub trait FacetHandler: Send + Sync {
    /// Executes the forwarded call.
    ///
    /// # Errors
    ///
    /// Any [`FacetError`] the facet's own logic produces; the dispatcher
    /// propagates it without modification.
    fn call(
        &self,
        state: &mut ProxyState,
        ctx: &CallContext,
        calldata: &[u8],
    ) -> Result<Bytes, FacetError>;
}

// =============================================================================
// FACET HOST
// =============================================================================

/// Implementation lookup for facet addresses.
///
/// `has_code` doubles as the deployment oracle for cut validation: Add and
/// Replace targets must answer true.
pub trait FacetHost: Send + Sync {
    /// Returns the handler deployed at an address, if any.
    fn handler(&self, facet: Address) -> Option<Arc<dyn FacetHandler>>;

    /// Returns true if the address hosts deployed code.
    fn has_code(&self, facet: Address) -> bool {
        self.handler(facet).is_some()
    }
}

// =============================================================================
// EVENT PUBLISHER
// =============================================================================

/// Audit sink for diamond events.
pub trait EventPublisher: Send + Sync {
    /// Publishes one event. Publication is observational only and must not
    /// fail the originating call.
    fn publish(&self, event: DiamondEvent);
}

// =============================================================================
// TESTS
// =============================================================================
