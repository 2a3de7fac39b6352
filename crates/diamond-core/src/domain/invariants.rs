//! # Domain Invariants
//!
//! Runtime checks for the registry invariants. The mutation paths
//! already enforce these at their boundaries; these checks exist so tests
//! and debug assertions can audit any reachable registry state.

use crate::domain::registry::Registry;
use crate::domain::value_objects::{Address, Selector};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: Bidirectional consistency.
///
/// Every routed selector appears exactly once in its facet's selector list,
/// and every listed selector routes back to that facet.
#[must_use]
pub fn check_bidirectional_consistency(registry: &Registry) -> bool {
    for facet in registry.facet_addresses() {
        let Some(selectors) = registry.selectors_of(*facet) else {
            return false;
        };
        for selector in selectors {
            if registry.facet_of(*selector) != Some(*facet) {
                return false;
            }
            if selectors.iter().filter(|s| *s == selector).count() != 1 {
                return false;
            }
        }
    }
    true
}

/// INVARIANT-2: Facet list consistency.
///
/// The global facet list holds exactly the distinct facets serving at least
/// one selector, with no duplicates and no empty facets.
#[must_use]
pub fn check_facet_list_consistency(registry: &Registry) -> bool {
    let addresses = registry.facet_addresses();
    for (i, facet) in addresses.iter().enumerate() {
        if addresses[..i].contains(facet) {
            return false;
        }
        match registry.selectors_of(*facet) {
            Some(selectors) if !selectors.is_empty() => {}
            _ => return false,
        }
    }
    let listed: usize = addresses
        .iter()
        .filter_map(|f| registry.selectors_of(*f))
        .map(<[Selector]>::len)
        .sum();
    listed == registry.selector_count()
}

/// INVARIANT-3: The reserved zero selector is never routed.
#[must_use]
pub fn check_reserved_selector(registry: &Registry) -> bool {
    !registry.contains(Selector::ZERO)
}

/// INVARIANT-4: The zero address is never a routing target.
#[must_use]
pub fn check_zero_facet(registry: &Registry) -> bool {
    !registry.facet_addresses().contains(&Address::ZERO)
}

/// Check all registry invariants at once.
#[must_use]
pub fn check_all_invariants(registry: &Registry) -> RegistryCheckResult {
    let mut violations = Vec::new();

    if !check_bidirectional_consistency(registry) {
        violations.push(RegistryViolation::InconsistentIndices);
    }
    if !check_facet_list_consistency(registry) {
        violations.push(RegistryViolation::InconsistentFacetList);
    }
    if !check_reserved_selector(registry) {
        violations.push(RegistryViolation::ReservedSelectorRouted);
    }
    if !check_zero_facet(registry) {
        violations.push(RegistryViolation::ZeroFacetRouted);
    }

    if violations.is_empty() {
        RegistryCheckResult::Valid
    } else {
        RegistryCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all registry invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<RegistryViolation>),
}

impl RegistryCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific registry invariant violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryViolation {
    /// Forward and reverse indices disagree.
    InconsistentIndices,
    /// Facet list does not match the set of routed facets.
    InconsistentFacetList,
    /// The reserved zero selector is routed.
    ReservedSelectorRouted,
    /// The zero address appears as a routing target.
    ZeroFacetRouted,
}

impl std::fmt::Display for RegistryViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InconsistentIndices => {
                write!(f, "selector and facet indices are inconsistent")
            }
            Self::InconsistentFacetList => {
                write!(f, "facet list does not match routed facets")
            }
            Self::ReservedSelectorRouted => {
                write!(f, "reserved zero selector is routed")
            }
            Self::ZeroFacetRouted => {
                write!(f, "zero address appears as routing target")
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
