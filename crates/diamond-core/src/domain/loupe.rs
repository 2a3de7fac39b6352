//! # Loupe (Introspection)
//!
//! Read-only queries over the selector registry. These never mutate state
//! and never fail: unknown facets yield empty selector lists and unknown
//! selectors resolve to the zero address.

use crate::domain::registry::{Facet, Registry};
use crate::domain::value_objects::{Address, Selector};

/// Full registry snapshot: every facet with its selectors, facet order =
/// registration order, selectors within a facet in registration order.
#[must_use]
pub fn facets(registry: &Registry) -> Vec<Facet> {
    registry.facets()
}

/// Selectors served by a facet; empty if the facet is unknown.
#[must_use]
pub fn facet_function_selectors(registry: &Registry, facet: Address) -> Vec<Selector> {
    registry
        .selectors_of(facet)
        .map(<[Selector]>::to_vec)
        .unwrap_or_default()
}

/// All facet addresses in registration order.
#[must_use]
pub fn facet_addresses(registry: &Registry) -> Vec<Address> {
    registry.facet_addresses().to_vec()
}

/// Resolves a selector to its facet; the zero address signals
/// "unregistered", not an error.
#[must_use]
pub fn facet_address(registry: &Registry, selector: Selector) -> Address {
    registry.facet_of(selector).unwrap_or(Address::ZERO)
}

// =============================================================================
// TESTS
// =============================================================================
