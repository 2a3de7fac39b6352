//! # Diamond Core - Modular Proxy Routing Subsystem
//!
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Implements a diamond proxy: a single stable entry address whose behavior is
//! composed from interchangeable facets. A selector registry routes 4-byte
//! function selectors to facet addresses, an atomic cut protocol rewires the
//! routing table, a loupe surface introspects it, and an emergency governance
//! facet halts and restores routing during incident response.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Bidirectional mapping consistency | `domain/invariants.rs` - `check_bidirectional_consistency()` |
//! | INVARIANT-2 | Facet list consistency | `domain/invariants.rs` - `check_facet_list_consistency()` |
//! | INVARIANT-3 | Reserved zero selector never routable | `domain/invariants.rs` - `check_reserved_selector()` |
//! | INVARIANT-4 | No selector routes to the zero address | `domain/invariants.rs` - `check_zero_facet()` |
//!
//! Every mutation is staged on a working copy and committed with a single
//! swap, so observers never see a registry that violates the table above.
//!
//! ## Authorization Matrix
//!
//! | Operation | Authorized Caller(s) | Enforcement |
//! |-----------|---------------------|-------------|
//! | `diamondCut` | Owner | `service.rs` - `apply_cut()` |
//! | `pause` | Owner, Pauser | `domain/emergency.rs` - `pause()` |
//! | `unpause` | Owner ONLY | `domain/emergency.rs` - `unpause()` |
//! | `removeFacet` | Owner, Pauser | `domain/emergency.rs` - `remove_facet()` |
//! | `transferOwnership` / `setPauser` | Owner | `domain/emergency.rs` |
//! | Fallback dispatch | Anyone | `service.rs` - `dispatch()` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use diamond_core::prelude::*;
//!
//! let mut service = DiamondService::new(host, publisher, config)?;
//!
//! // Install a facet, then call through the fallback path.
//! service.apply_cut(owner, cuts, None)?;
//! let output = service.dispatch(caller, &calldata)?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Value objects
    pub use crate::domain::value_objects::{
        Address, Bytes, Hash, Selector, StorageKey, StorageValue, U256,
    };

    // Registry and cut protocol
    pub use crate::domain::cut::{FacetCut, FacetCutAction, InitCall};
    pub use crate::domain::registry::{Facet, Registry};

    // Dispatch and storage
    pub use crate::domain::dispatcher::{resolve, Resolution};
    pub use crate::domain::storage::{CallContext, DiamondStorage, ProxyState};

    // Emergency governance
    pub use crate::domain::emergency::{self, GovernanceOutcome};

    // Domain services
    pub use crate::domain::services::{diamond_storage_position, keccak256};

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, RegistryCheckResult, RegistryViolation,
    };

    // Ports
    pub use crate::ports::inbound::DiamondApi;
    pub use crate::ports::outbound::{EventPublisher, FacetHandler, FacetHost};

    // Service
    pub use crate::service::{DiamondConfig, DiamondService, ServiceStats};

    // Errors and events
    pub use crate::errors::{DiamondError, FacetError};
    pub use crate::events::{topics, DiamondEvent, DiamondEventKind};
}

/// Crate version, from the package manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
