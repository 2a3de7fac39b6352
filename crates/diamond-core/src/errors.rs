//! # Error Types
//!
//! The full failure taxonomy for the diamond proxy. Every failure aborts the
//! whole call with no partial mutation; callers can branch on the variant to
//! distinguish permission problems from routing problems.

use crate::domain::value_objects::{Address, Selector};
use thiserror::Error;

// =============================================================================
// DIAMOND ERRORS
// =============================================================================

/// Errors surfaced by the registry, cut protocol, dispatcher, and governance.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiamondError {
    /// Caller lacks the required privileged identity.
    #[error("unauthorized: caller {caller:?} is not permitted to {operation}")]
    Unauthorized {
        /// The caller that was rejected.
        caller: Address,
        /// Short name of the attempted operation.
        operation: &'static str,
    },

    /// A cut operation's parameters are self-contradictory.
    #[error("invalid cut configuration: {0}")]
    InvalidConfig(String),

    /// Add targeting a selector that is already routed.
    #[error("selector {selector} already registered to facet {facet:?}")]
    AlreadyRegistered {
        /// The conflicting selector.
        selector: Selector,
        /// The facet it is currently routed to.
        facet: Address,
    },

    /// Replace/Remove targeting a selector (or facet) that does not exist.
    #[error("selector {0} is not registered")]
    NotRegistered(Selector),

    /// Facet has no routing entries at all.
    #[error("facet {0:?} has no registered selectors")]
    FacetNotRegistered(Address),

    /// Dispatcher cannot resolve a selector.
    #[error("function does not exist: {0}")]
    FunctionDoesNotExist(Selector),

    /// Routing is halted; only the emergency facet is reachable.
    #[error("diamond is paused")]
    DiamondIsPaused,

    /// Unpause attempted while routing was never halted.
    #[error("diamond is not paused")]
    DiamondNotPaused,

    /// A forwarded call failed inside the target facet; the reason is relayed
    /// verbatim, never swallowed.
    #[error("external call to facet {facet:?} failed: {reason}")]
    ExternalCallFailed {
        /// The facet that was called.
        facet: Address,
        /// The facet's failure reason, unchanged.
        reason: String,
    },

    /// Call payload is too short to carry a selector, or arguments do not
    /// decode as ABI words.
    #[error("malformed calldata: {0}")]
    MalformedCalldata(String),
}

// =============================================================================
// FACET ERRORS
// =============================================================================

/// Failures produced by a facet handler during a forwarded call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FacetError {
    /// The facet deliberately reverted with a reason.
    #[error("revert: {0}")]
    Revert(String),

    /// The facet could not decode its input.
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl FacetError {
    /// Converts into the dispatcher-level error, tagging the failing facet.
    #[must_use]
    pub fn into_dispatch_error(self, facet: Address) -> DiamondError {
        DiamondError::ExternalCallFailed {
            facet,
            reason: self.to_string(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
