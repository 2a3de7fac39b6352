//! # Diamond Cut Protocol
//!
//! The only mutator of the selector registry. A cut is an ordered batch of
//! Add / Replace / Remove operations applied transactionally: every
//! operation is validated and staged on a working copy, and the working copy
//! is published only if the whole batch validated. A single violation leaves
//! the committed registry untouched.

use crate::domain::registry::Registry;
use crate::domain::value_objects::{Address, Bytes, Selector};
use crate::errors::DiamondError;
use serde::{Deserialize, Serialize};

// =============================================================================
// CUT OPERATIONS
// =============================================================================

/// Kind of change a single cut operation performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacetCutAction {
    /// Route new selectors to a facet.
    Add,
    /// Re-route already-registered selectors to a different facet.
    Replace,
    /// Delete routing entries. The facet address must be zero, since removal
    /// needs no destination.
    Remove,
}

/// One operation in a cut batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCut {
    /// Target facet (zero for Remove).
    pub facet_address: Address,
    /// What to do with the selectors.
    pub action: FacetCutAction,
    /// Selectors affected; must be non-empty.
    pub selectors: Vec<Selector>,
}

/// Optional one-time migration call executed against the proxy's own storage
/// after a successful cut. Its failure aborts the entire batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitCall {
    /// Facet to run the migration on.
    pub target: Address,
    /// Full calldata for the migration call.
    pub calldata: Bytes,
}

// =============================================================================
// STAGING
// =============================================================================

/// Validates and applies a cut batch against a working copy of the committed
/// registry, returning the staged copy.
///
/// `is_deployed` answers whether an address hosts code; Add and Replace
/// targets must be deployed.
///
/// # Errors
///
/// `InvalidConfig` for self-contradictory operations (empty selector set,
/// zero or undeployed facet on Add/Replace, non-zero facet on Remove),
/// `AlreadyRegistered` / `NotRegistered` for selector conflicts. Any error
/// means no mutation is published.
pub fn stage_cut<F>(
    committed: &Registry,
    cuts: &[FacetCut],
    is_deployed: F,
) -> Result<Registry, DiamondError>
where
    F: Fn(Address) -> bool,
{
    if cuts.is_empty() {
        return Err(DiamondError::InvalidConfig(
            "cut batch contains no operations".to_string(),
        ));
    }

    let mut staged = committed.clone();
    for cut in cuts {
        if cut.selectors.is_empty() {
            return Err(DiamondError::InvalidConfig(format!(
                "cut for facet {:?} has an empty selector set",
                cut.facet_address
            )));
        }
        match cut.action {
            FacetCutAction::Add => {
                require_deployed_target(cut.facet_address, &is_deployed)?;
                for &selector in &cut.selectors {
                    staged.add_selector(selector, cut.facet_address)?;
                }
            }
            FacetCutAction::Replace => {
                require_deployed_target(cut.facet_address, &is_deployed)?;
                for &selector in &cut.selectors {
                    staged.replace_selector(selector, cut.facet_address)?;
                }
            }
            FacetCutAction::Remove => {
                if !cut.facet_address.is_zero() {
                    return Err(DiamondError::InvalidConfig(
                        "remove operations must carry the zero facet address".to_string(),
                    ));
                }
                for &selector in &cut.selectors {
                    staged.remove_selector(selector)?;
                }
            }
        }
    }
    Ok(staged)
}

fn require_deployed_target<F>(facet: Address, is_deployed: &F) -> Result<(), DiamondError>
where
    F: Fn(Address) -> bool,
{
    if facet.is_zero() {
        return Err(DiamondError::InvalidConfig(
            "add/replace target cannot be the zero address".to_string(),
        ));
    }
    if !is_deployed(facet) {
        return Err(DiamondError::InvalidConfig(format!(
            "facet {facet:?} has no code deployed"
        )));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
