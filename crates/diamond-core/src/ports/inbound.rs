//! # Driving Ports (API - Inbound)
//!
//! The selector-addressed API the diamond proxy presents: the cut protocol,
//! loupe introspection, the fallback dispatch path, and emergency
//! governance. Synchronous by design — the hosting platform serializes
//! calls, so each entry point runs to completion (or full rollback) before
//! the next begins.

use crate::domain::cut::{FacetCut, InitCall};
use crate::domain::registry::Facet;
use crate::domain::value_objects::{Address, Bytes, Selector};
use crate::errors::DiamondError;

/// Primary API of the diamond proxy.
pub trait DiamondApi {
    /// Applies a batch of Add/Replace/Remove operations atomically, then
    /// runs the optional init call against the proxy's own storage. Owner
    /// only. A single violation (including init failure) aborts the whole
    /// batch with no mutation.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `InvalidConfig`, `AlreadyRegistered`,
    /// `NotRegistered`, or `ExternalCallFailed` from a failed init call.
    fn apply_cut(
        &mut self,
        caller: Address,
        cuts: Vec<FacetCut>,
        init: Option<InitCall>,
    ) -> Result<(), DiamondError>;

    /// Fallback dispatch: extracts the leading selector, resolves it against
    /// the registry (honoring the pause gate), forwards the full call to the
    /// resolved facet, and relays its result or failure verbatim.
    ///
    /// # Errors
    ///
    /// `MalformedCalldata` for payloads shorter than a selector,
    /// `FunctionDoesNotExist` for unregistered selectors,
    /// `DiamondIsPaused` while halted, `ExternalCallFailed` when the facet
    /// itself fails.
    fn dispatch(&mut self, caller: Address, calldata: &[u8]) -> Result<Bytes, DiamondError>;

    /// Full registry snapshot in registration order.
    fn facets(&self) -> Vec<Facet>;

    /// Selectors served by a facet; empty for unknown facets.
    fn facet_function_selectors(&self, facet: Address) -> Vec<Selector>;

    /// All facet addresses in registration order.
    fn facet_addresses(&self) -> Vec<Address>;

    /// Resolves a selector; the zero address means unregistered.
    fn facet_address(&self, selector: Selector) -> Address;

    /// Halts all routing except the emergency facet. Owner or pauser.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, or `DiamondIsPaused` when already halted.
    fn pause(&mut self, caller: Address) -> Result<(), DiamondError>;

    /// Restores routing, excluding blacklisted facets. Owner only.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, or `DiamondNotPaused` when not halted.
    fn unpause(&mut self, caller: Address, blacklist: Vec<Address>) -> Result<(), DiamondError>;

    /// Permanently deletes a facet's routing entries, in either state.
    /// Owner or pauser.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `FacetNotRegistered`, or `InvalidConfig` when
    /// targeting the emergency facet.
    fn remove_facet(&mut self, caller: Address, facet: Address) -> Result<(), DiamondError>;

    /// Hands ownership to a new address. Owner only.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, or `InvalidConfig` for the zero address.
    fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), DiamondError>;

    /// Rotates the pauser wallet. Owner only.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, or `InvalidConfig` for the zero address.
    fn set_pauser(&mut self, caller: Address, new_pauser: Address) -> Result<(), DiamondError>;

    /// Returns true while routing is halted.
    fn is_paused(&self) -> bool;
}
