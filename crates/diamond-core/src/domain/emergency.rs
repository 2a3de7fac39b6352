//! # Emergency Governance
//!
//! The pause/recovery state machine: `Active` ⇄ `Paused`, cycling
//! indefinitely. Pausing flips the global gate consulted by the dispatcher
//! and never touches the registry, so the pre-pause routing table is itself
//! the snapshot that unpause restores. Unpause may exclude ("blacklist")
//! chosen facets, which is applied as an implicit Remove cut.
//!
//! The governance surface is reachable two ways: as typed operations on the
//! service, and as selector-addressed calls routed through the fallback
//! dispatcher to the emergency facet address (see [`abi`]). The dispatcher
//! allow-lists that facet while paused, so unpause can never be locked out.

use crate::domain::services;
use crate::domain::storage::ProxyState;
use crate::domain::value_objects::{Address, Selector};
use crate::errors::DiamondError;

// =============================================================================
// STATE MACHINE OPERATIONS
// =============================================================================

/// Halts all routing except the emergency facet. Owner or pauser only.
///
/// # Errors
///
/// `Unauthorized` for other callers; `DiamondIsPaused` when already paused
/// (re-entering the Paused state is rejected, not a no-op).
pub fn pause(state: &mut ProxyState, caller: Address) -> Result<(), DiamondError> {
    state.diamond.ensure_owner_or_pauser(caller, "pause")?;
    if state.diamond.paused {
        return Err(DiamondError::DiamondIsPaused);
    }
    state.diamond.paused = true;
    Ok(())
}

/// Restores routing, excluding every blacklisted facet's selectors. Owner
/// only. Returns the selectors actually removed, per excluded facet.
///
/// Blacklisted addresses that serve no selectors are benign no-ops, so the
/// same blacklist can be replayed across pause cycles.
///
/// # Errors
///
/// `Unauthorized` for non-owners; `DiamondNotPaused` when not paused.
pub fn unpause(
    state: &mut ProxyState,
    caller: Address,
    blacklist: &[Address],
) -> Result<Vec<(Address, Vec<Selector>)>, DiamondError> {
    state.diamond.ensure_owner(caller, "unpause")?;
    if !state.diamond.paused {
        return Err(DiamondError::DiamondNotPaused);
    }

    let mut removed = Vec::new();
    for &facet in blacklist {
        if state.diamond.registry.selectors_of(facet).is_some() {
            let selectors = state.diamond.registry.remove_facet_selectors(facet)?;
            removed.push((facet, selectors));
        }
    }
    state.diamond.paused = false;
    Ok(removed)
}

/// Permanently deletes all of a facet's routing entries, in either state.
/// Owner or pauser. Returns the removed selectors.
///
/// # Errors
///
/// `Unauthorized` for other callers; `InvalidConfig` when targeting the
/// emergency facet itself (governance can never be excised);
/// `FacetNotRegistered` when the facet serves no selector.
pub fn remove_facet(
    state: &mut ProxyState,
    caller: Address,
    facet: Address,
) -> Result<Vec<Selector>, DiamondError> {
    state.diamond.ensure_owner_or_pauser(caller, "removeFacet")?;
    if facet == state.diamond.emergency_facet {
        return Err(DiamondError::InvalidConfig(
            "the emergency facet cannot be removed".to_string(),
        ));
    }
    state.diamond.registry.remove_facet_selectors(facet)
}

/// Hands ownership to a new address. Owner only.
///
/// # Errors
///
/// `Unauthorized` for non-owners; `InvalidConfig` for the zero address.
pub fn transfer_ownership(
    state: &mut ProxyState,
    caller: Address,
    new_owner: Address,
) -> Result<Address, DiamondError> {
    state.diamond.ensure_owner(caller, "transferOwnership")?;
    if new_owner.is_zero() {
        return Err(DiamondError::InvalidConfig(
            "owner cannot be the zero address".to_string(),
        ));
    }
    let previous = state.diamond.owner;
    state.diamond.owner = new_owner;
    Ok(previous)
}

/// Rotates the pauser wallet. Owner only.
///
/// # Errors
///
/// `Unauthorized` for non-owners; `InvalidConfig` for the zero address.
pub fn set_pauser(
    state: &mut ProxyState,
    caller: Address,
    new_pauser: Address,
) -> Result<Address, DiamondError> {
    state.diamond.ensure_owner(caller, "setPauserWallet")?;
    if new_pauser.is_zero() {
        return Err(DiamondError::InvalidConfig(
            "pauser cannot be the zero address".to_string(),
        ));
    }
    let previous = state.diamond.pauser;
    state.diamond.pauser = new_pauser;
    Ok(previous)
}

// =============================================================================
// SELECTOR-ADDRESSED SURFACE
// =============================================================================

/// ABI surface of the emergency facet: selector derivation and calldata
/// encoding for the governance entry points.
pub mod abi {
    use super::{services, Address, Selector};

    /// Selector of `pause()`.
    #[must_use]
    pub fn pause_selector() -> Selector {
        Selector::from_signature("pause()")
    }

    /// Selector of `unpause(address[])`.
    #[must_use]
    pub fn unpause_selector() -> Selector {
        Selector::from_signature("unpause(address[])")
    }

    /// Selector of `removeFacet(address)`.
    #[must_use]
    pub fn remove_facet_selector() -> Selector {
        Selector::from_signature("removeFacet(address)")
    }

    /// All selectors served by the emergency facet.
    #[must_use]
    pub fn selectors() -> Vec<Selector> {
        vec![
            pause_selector(),
            unpause_selector(),
            remove_facet_selector(),
        ]
    }

    /// Encodes a `pause()` call.
    #[must_use]
    pub fn pause_calldata() -> Vec<u8> {
        pause_selector().as_bytes().to_vec()
    }

    /// Encodes an `unpause(address[])` call.
    #[must_use]
    pub fn unpause_calldata(blacklist: &[Address]) -> Vec<u8> {
        let mut out = unpause_selector().as_bytes().to_vec();
        out.extend_from_slice(&services::encode_address_array_args(blacklist));
        out
    }

    /// Encodes a `removeFacet(address)` call.
    #[must_use]
    pub fn remove_facet_calldata(facet: Address) -> Vec<u8> {
        let mut out = remove_facet_selector().as_bytes().to_vec();
        out.extend_from_slice(&services::encode_address_args(facet));
        out
    }
}

/// Effect of a governance call routed through the dispatcher, so the caller
/// can emit the matching event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GovernanceOutcome {
    /// Routing was halted.
    Paused,
    /// Routing was restored; blacklisted facets lost these selectors.
    Unpaused {
        /// Facets excluded from restoration.
        blacklist: Vec<Address>,
        /// Selectors actually removed, per excluded facet.
        removed: Vec<(Address, Vec<Selector>)>,
    },
    /// A facet's routing was permanently deleted.
    FacetRemoved {
        /// The excised facet.
        facet: Address,
        /// Its former selectors.
        selectors: Vec<Selector>,
    },
}

/// Decodes and applies a governance call addressed to the emergency facet.
///
/// # Errors
///
/// `MalformedCalldata` when arguments do not decode as ABI words,
/// `FunctionDoesNotExist` for selectors the facet does not serve, plus the
/// per-operation errors documented on [`pause`], [`unpause`] and
/// [`remove_facet`].
pub fn handle_governance_call(
    state: &mut ProxyState,
    caller: Address,
    calldata: &[u8],
) -> Result<GovernanceOutcome, DiamondError> {
    let selector = Selector::from_calldata(calldata).ok_or_else(|| {
        DiamondError::MalformedCalldata("payload shorter than a selector".to_string())
    })?;
    let args = &calldata[4..];

    if selector == abi::pause_selector() {
        pause(state, caller)?;
        Ok(GovernanceOutcome::Paused)
    } else if selector == abi::unpause_selector() {
        let blacklist = services::decode_address_array(args, 0).ok_or_else(|| {
            DiamondError::MalformedCalldata("unpause expects an address[] argument".to_string())
        })?;
        let removed = unpause(state, caller, &blacklist)?;
        Ok(GovernanceOutcome::Unpaused { blacklist, removed })
    } else if selector == abi::remove_facet_selector() {
        let facet = services::decode_address_word(args, 0).ok_or_else(|| {
            DiamondError::MalformedCalldata("removeFacet expects an address argument".to_string())
        })?;
        let selectors = remove_facet(state, caller, facet)?;
        Ok(GovernanceOutcome::FacetRemoved { facet, selectors })
    } else {
        Err(DiamondError::FunctionDoesNotExist(selector))
    }
}

// =============================================================================
// TESTS
// =============================================================================
