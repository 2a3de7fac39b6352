//! # Proxy Storage
//!
//! The proxy's single owned store. Facet handlers execute against a mutable
//! handle to this state, which is how delegated execution with shared storage
//! is modelled outside the original execution environment.
//!
//! The diamond's own bookkeeping (registry, pause flag, privileged
//! identities) lives in a reserved namespace separate from the generic slot
//! map facets write to, so arbitrary future facet code cannot collide with
//! it. The namespace position is `services::diamond_storage_position()`.

use crate::domain::registry::Registry;
use crate::domain::value_objects::{Address, StorageKey, StorageValue};
use crate::errors::DiamondError;
use std::collections::HashMap;
use uuid::Uuid;

// =============================================================================
// DIAMOND STORAGE (reserved namespace)
// =============================================================================

/// The diamond's reserved bookkeeping region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiamondStorage {
    /// The selector routing table.
    pub registry: Registry,
    /// Global pause flag consulted before every resolution. Pausing never
    /// rewrites the registry, so toggling is O(1).
    pub paused: bool,
    /// Owner: exclusive rights to cuts, unpause, and identity rotation.
    pub owner: Address,
    /// Pauser wallet: additionally permitted to pause and remove facets.
    pub pauser: Address,
    /// Address of the emergency governance facet. Its selectors stay
    /// routable while paused so the system can always be unpaused.
    pub emergency_facet: Address,
}

impl DiamondStorage {
    /// Requires the caller to be the owner.
    ///
    /// # Errors
    ///
    /// `Unauthorized` for any other caller.
    pub fn ensure_owner(
        &self,
        caller: Address,
        operation: &'static str,
    ) -> Result<(), DiamondError> {
        if caller == self.owner {
            Ok(())
        } else {
            Err(DiamondError::Unauthorized { caller, operation })
        }
    }

    /// Requires the caller to be the owner or the pauser wallet.
    ///
    /// # Errors
    ///
    /// `Unauthorized` for any other caller.
    pub fn ensure_owner_or_pauser(
        &self,
        caller: Address,
        operation: &'static str,
    ) -> Result<(), DiamondError> {
        if caller == self.owner || caller == self.pauser {
            Ok(())
        } else {
            Err(DiamondError::Unauthorized { caller, operation })
        }
    }
}

// =============================================================================
// PROXY STATE
// =============================================================================

/// The proxy's complete persistent state: the reserved diamond namespace
/// plus the shared slot storage all facets execute against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProxyState {
    /// Reserved diamond bookkeeping.
    pub diamond: DiamondStorage,
    /// Shared facet slot storage.
    slots: HashMap<StorageKey, StorageValue>,
}

impl ProxyState {
    /// Creates an empty state with the given privileged identities.
    #[must_use]
    pub fn new(owner: Address, pauser: Address, emergency_facet: Address) -> Self {
        Self {
            diamond: DiamondStorage {
                registry: Registry::new(),
                paused: false,
                owner,
                pauser,
                emergency_facet,
            },
            slots: HashMap::new(),
        }
    }

    /// Reads a facet storage slot; zero if never written.
    #[must_use]
    pub fn slot(&self, key: StorageKey) -> StorageValue {
        self.slots.get(&key).copied().unwrap_or(StorageValue::ZERO)
    }

    /// Writes a facet storage slot.
    pub fn set_slot(&mut self, key: StorageKey, value: StorageValue) {
        self.slots.insert(key, value);
    }

    /// Number of written facet slots.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

// =============================================================================
// CALL CONTEXT
// =============================================================================

/// Per-call execution context forwarded to the resolved facet. The original
/// caller identity is preserved across the dispatch boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallContext {
    /// The original external caller.
    pub caller: Address,
    /// Correlation id for this call, carried into emitted events.
    pub call_id: Uuid,
}

impl CallContext {
    /// Creates a context for a fresh external call.
    #[must_use]
    pub fn new(caller: Address) -> Self {
        Self {
            caller,
            call_id: Uuid::new_v4(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
