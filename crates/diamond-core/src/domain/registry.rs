//! # Selector Registry
//!
//! The persistent selector → facet routing table plus its reverse indices.
//!
//! ## Invariants
//!
//! - Every routed selector appears exactly once in its facet's selector
//!   list (bidirectional consistency).
//! - The global facet list contains exactly the distinct facets that serve
//!   at least one selector; a facet with zero selectors does not exist.
//! - The reserved zero selector is never registered.
//! - The zero address is never a routing target.
//!
//! Position indices are swap-remove maintained so that single-selector
//! removal is O(1) and iteration order stays registration order for
//! untouched entries.

use crate::domain::value_objects::{Address, Selector};
use crate::errors::DiamondError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// ENTRIES
// =============================================================================

/// Routing entry for a single selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectorEntry {
    /// The facet this selector routes to.
    pub facet: Address,
    /// Index of the selector inside its facet's selector list.
    pub position: usize,
}

/// Per-facet record: its place in the global facet list and the selectors it
/// serves, in registration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacetRecord {
    /// Index of the facet inside the global facet list.
    pub position: usize,
    /// Selectors served by this facet.
    pub selectors: Vec<Selector>,
}

/// Loupe view of one facet and its selectors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    /// The facet address.
    pub facet_address: Address,
    /// Selectors served by the facet, in registration order.
    pub selectors: Vec<Selector>,
}

// =============================================================================
// REGISTRY
// =============================================================================

/// The selector → facet routing table with reverse indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    selector_to_facet: HashMap<Selector, SelectorEntry>,
    facet_addresses: Vec<Address>,
    facet_to_selectors: HashMap<Address, FacetRecord>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of routed selectors.
    #[must_use]
    pub fn selector_count(&self) -> usize {
        self.selector_to_facet.len()
    }

    /// Returns true if no selector is routed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selector_to_facet.is_empty()
    }

    /// Returns true if the selector is routed.
    #[must_use]
    pub fn contains(&self, selector: Selector) -> bool {
        self.selector_to_facet.contains_key(&selector)
    }

    /// Resolves a selector to its facet, if routed.
    #[must_use]
    pub fn facet_of(&self, selector: Selector) -> Option<Address> {
        self.selector_to_facet.get(&selector).map(|e| e.facet)
    }

    /// Selectors served by a facet; None if the facet is unknown.
    #[must_use]
    pub fn selectors_of(&self, facet: Address) -> Option<&[Selector]> {
        self.facet_to_selectors
            .get(&facet)
            .map(|r| r.selectors.as_slice())
    }

    /// All facet addresses, in registration order.
    #[must_use]
    pub fn facet_addresses(&self) -> &[Address] {
        &self.facet_addresses
    }

    /// Full snapshot: every facet with its selectors, in registration order.
    #[must_use]
    pub fn facets(&self) -> Vec<Facet> {
        self.facet_addresses
            .iter()
            .map(|&facet_address| Facet {
                facet_address,
                selectors: self
                    .facet_to_selectors
                    .get(&facet_address)
                    .map(|r| r.selectors.clone())
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Routes a new selector to a facet.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for the zero selector or zero facet,
    /// `AlreadyRegistered` when the selector is already routed.
    pub fn add_selector(&mut self, selector: Selector, facet: Address) -> Result<(), DiamondError> {
        if selector.is_zero() {
            return Err(DiamondError::InvalidConfig(
                "the zero selector is reserved".to_string(),
            ));
        }
        if facet.is_zero() {
            return Err(DiamondError::InvalidConfig(
                "cannot route to the zero address".to_string(),
            ));
        }
        if let Some(existing) = self.selector_to_facet.get(&selector) {
            return Err(DiamondError::AlreadyRegistered {
                selector,
                facet: existing.facet,
            });
        }

        let new_position = self.facet_addresses.len();
        let facet_addresses = &mut self.facet_addresses;
        let record = self.facet_to_selectors.entry(facet).or_insert_with(|| {
            facet_addresses.push(facet);
            FacetRecord {
                position: new_position,
                selectors: Vec::new(),
            }
        });
        record.selectors.push(selector);
        let position = record.selectors.len() - 1;
        self.selector_to_facet
            .insert(selector, SelectorEntry { facet, position });
        Ok(())
    }

    /// Re-routes an existing selector to a different facet.
    ///
    /// # Errors
    ///
    /// `NotRegistered` when the selector is not routed, `AlreadyRegistered`
    /// when it already routes to the given facet, `InvalidConfig` for the
    /// zero facet.
    pub fn replace_selector(
        &mut self,
        selector: Selector,
        facet: Address,
    ) -> Result<(), DiamondError> {
        if facet.is_zero() {
            return Err(DiamondError::InvalidConfig(
                "cannot route to the zero address".to_string(),
            ));
        }
        let current = self
            .facet_of(selector)
            .ok_or(DiamondError::NotRegistered(selector))?;
        if current == facet {
            return Err(DiamondError::AlreadyRegistered { selector, facet });
        }
        self.remove_selector(selector)?;
        self.add_selector(selector, facet)
    }

    /// Deletes a selector's routing entry.
    ///
    /// Removing a facet's last selector also removes the facet from the
    /// global list.
    ///
    /// # Errors
    ///
    /// `NotRegistered` when the selector is not routed.
    pub fn remove_selector(&mut self, selector: Selector) -> Result<(), DiamondError> {
        let entry = self
            .selector_to_facet
            .remove(&selector)
            .ok_or(DiamondError::NotRegistered(selector))?;

        let record = self
            .facet_to_selectors
            .get_mut(&entry.facet)
            .ok_or(DiamondError::NotRegistered(selector))?;

        // Swap-remove within the facet's selector list, fixing up the moved
        // selector's position index.
        record.selectors.swap_remove(entry.position);
        if let Some(&moved) = record.selectors.get(entry.position) {
            if let Some(moved_entry) = self.selector_to_facet.get_mut(&moved) {
                moved_entry.position = entry.position;
            }
        }

        if record.selectors.is_empty() {
            let facet_position = record.position;
            self.facet_to_selectors.remove(&entry.facet);
            self.facet_addresses.swap_remove(facet_position);
            if let Some(&moved_facet) = self.facet_addresses.get(facet_position) {
                if let Some(moved_record) = self.facet_to_selectors.get_mut(&moved_facet) {
                    moved_record.position = facet_position;
                }
            }
        }
        Ok(())
    }

    /// Deletes every routing entry of a facet, returning the removed
    /// selectors in registration order.
    ///
    /// # Errors
    ///
    /// `FacetNotRegistered` when the facet serves no selector.
    pub fn remove_facet_selectors(
        &mut self,
        facet: Address,
    ) -> Result<Vec<Selector>, DiamondError> {
        let selectors = self
            .selectors_of(facet)
            .ok_or(DiamondError::FacetNotRegistered(facet))?
            .to_vec();
        for &selector in &selectors {
            self.remove_selector(selector)?;
        }
        Ok(selectors)
    }
}

// =============================================================================
// TESTS
// =============================================================================
