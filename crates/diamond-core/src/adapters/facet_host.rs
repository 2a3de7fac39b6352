//! # In-Memory Facet Host
//!
//! Facet deployment for a single process: handlers registered by address.
//! Production hosts would resolve addresses to actual deployed code; the
//! registry core is indifferent to where implementations live.
//!
//! Also carries the small reference facets the test suites route through.

use crate::domain::storage::{CallContext, ProxyState};
use crate::domain::value_objects::{Address, Bytes, StorageKey, StorageValue, U256};
use crate::errors::FacetError;
use crate::ports::outbound::{FacetHandler, FacetHost};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

// =============================================================================
// HOST
// =============================================================================

/// Handler lookup backed by a process-local map.
#[derive(Default)]
pub struct InMemoryFacetHost {
    handlers: RwLock<HashMap<Address, Arc<dyn FacetHandler>>>,
}

impl InMemoryFacetHost {
    /// Creates an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploys a handler at an address, replacing any previous deployment.
    pub fn deploy(&self, facet: Address, handler: Arc<dyn FacetHandler>) {
        self.handlers
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(facet, handler);
    }

    /// Removes the handler at an address.
    pub fn undeploy(&self, facet: Address) {
        self.handlers
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(&facet);
    }
}

impl FacetHost for InMemoryFacetHost {
    fn handler(&self, facet: Address) -> Option<Arc<dyn FacetHandler>> {
        self.handlers
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&facet)
            .cloned()
    }
}

// =============================================================================
// REFERENCE FACETS
// =============================================================================

/// Echoes its calldata back unchanged. Useful for asserting verbatim relay.
pub struct EchoFacet;

impl FacetHandler for EchoFacet {
    fn call(
        &self,
        _state: &mut ProxyState,
        _ctx: &CallContext,
        calldata: &[u8],
    ) -> Result<Bytes, FacetError> {
        Ok(Bytes::from_slice(calldata))
    }
}

/// Increments a counter in shared slot storage and returns the new value as
/// a 32-byte word. Demonstrates facet logic executing against the proxy's
/// own persistent storage.
pub struct CounterFacet {
    /// Slot the counter lives in.
    pub slot: StorageKey,
}

impl FacetHandler for CounterFacet {
    fn call(
        &self,
        state: &mut ProxyState,
        _ctx: &CallContext,
        _calldata: &[u8],
    ) -> Result<Bytes, FacetError> {
        let next = state
            .slot(self.slot)
            .to_u256()
            .checked_add(U256::one())
            .ok_or_else(|| FacetError::Revert("counter overflow".to_string()))?;
        let value = StorageValue::from_u256(next);
        state.set_slot(self.slot, value);
        Ok(Bytes::from_slice(&value.0))
    }
}

/// Always reverts with a fixed reason. Useful for asserting that facet
/// failures propagate unchanged.
pub struct RevertingFacet {
    /// The revert reason to surface.
    pub reason: &'static str,
}

impl FacetHandler for RevertingFacet {
    fn call(
        &self,
        _state: &mut ProxyState,
        _ctx: &CallContext,
        _calldata: &[u8],
    ) -> Result<Bytes, FacetError> {
        Err(FacetError::Revert(self.reason.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
