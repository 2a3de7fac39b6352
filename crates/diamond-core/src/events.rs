//! # Event Schema
//!
//! Auditable records emitted for every registry mutation and governance
//! transition. Off-chain observers consume these to reconstruct exactly what
//! changed and who initiated it; payloads are serde so they can cross any
//! transport.

use crate::domain::cut::{FacetCut, InitCall};
use crate::domain::value_objects::{Address, Selector};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// PAYLOADS
// =============================================================================

/// A cut batch was applied: the exact operation list, the optional init
/// call, and the initiating owner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiamondCutAppliedPayload {
    /// Operations applied, in order.
    pub cuts: Vec<FacetCut>,
    /// The one-time migration call, if any.
    pub init: Option<InitCall>,
    /// The owner that applied the batch.
    pub initiator: Address,
}

/// Routing was halted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmergencyPausedPayload {
    /// Owner or pauser that halted routing.
    pub initiator: Address,
}

/// Routing was restored, minus blacklisted facets.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmergencyUnpausedPayload {
    /// Owner that restored routing.
    pub initiator: Address,
    /// Facets excluded from restoration.
    pub blacklist: Vec<Address>,
}

/// A facet's routing entries were permanently deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmergencyFacetRemovedPayload {
    /// The excised facet.
    pub facet_address: Address,
    /// Its former selectors.
    pub selectors: Vec<Selector>,
    /// Owner or pauser that removed it.
    pub initiator: Address,
}

/// Ownership moved to a new address.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OwnershipTransferredPayload {
    /// The outgoing owner.
    pub previous_owner: Address,
    /// The incoming owner.
    pub new_owner: Address,
}

/// The pauser wallet was rotated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PauserChangedPayload {
    /// The outgoing pauser wallet.
    pub previous_pauser: Address,
    /// The incoming pauser wallet.
    pub new_pauser: Address,
}

// =============================================================================
// EVENT ENVELOPE
// =============================================================================

/// A correlated diamond event.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiamondEvent {
    /// Correlation id of the call that produced this event.
    pub correlation_id: Uuid,
    /// The event body.
    pub kind: DiamondEventKind,
}

/// All observable diamond events.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum DiamondEventKind {
    /// See [`DiamondCutAppliedPayload`].
    DiamondCutApplied(DiamondCutAppliedPayload),
    /// See [`EmergencyPausedPayload`].
    EmergencyPaused(EmergencyPausedPayload),
    /// See [`EmergencyUnpausedPayload`].
    EmergencyUnpaused(EmergencyUnpausedPayload),
    /// See [`EmergencyFacetRemovedPayload`].
    EmergencyFacetRemoved(EmergencyFacetRemovedPayload),
    /// See [`OwnershipTransferredPayload`].
    OwnershipTransferred(OwnershipTransferredPayload),
    /// See [`PauserChangedPayload`].
    PauserChanged(PauserChangedPayload),
}

impl DiamondEventKind {
    /// The topic string this event is published under.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::DiamondCutApplied(_) => topics::DIAMOND_CUT_APPLIED,
            Self::EmergencyPaused(_) => topics::EMERGENCY_PAUSED,
            Self::EmergencyUnpaused(_) => topics::EMERGENCY_UNPAUSED,
            Self::EmergencyFacetRemoved(_) => topics::EMERGENCY_FACET_REMOVED,
            Self::OwnershipTransferred(_) => topics::OWNERSHIP_TRANSFERRED,
            Self::PauserChanged(_) => topics::PAUSER_CHANGED,
        }
    }
}

// =============================================================================
// TOPICS
// =============================================================================

/// Publication topics for diamond events.
pub mod topics {
    /// Topic for cut application records.
    pub const DIAMOND_CUT_APPLIED: &str = "diamond.cut.applied";

    /// Topic for pause transitions.
    pub const EMERGENCY_PAUSED: &str = "diamond.emergency.paused";

    /// Topic for unpause transitions.
    pub const EMERGENCY_UNPAUSED: &str = "diamond.emergency.unpaused";

    /// Topic for permanent facet removal.
    pub const EMERGENCY_FACET_REMOVED: &str = "diamond.emergency.facet_removed";

    /// Topic for ownership transfers.
    pub const OWNERSHIP_TRANSFERRED: &str = "diamond.ownership.transferred";

    /// Topic for pauser wallet rotation.
    pub const PAUSER_CHANGED: &str = "diamond.pauser.changed";
}

// =============================================================================
// TESTS
// =============================================================================
