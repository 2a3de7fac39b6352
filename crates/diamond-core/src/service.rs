//! # Diamond Service
//!
//! The proxy's entry-point surface: owns the proxy state, wires the cut
//! protocol, loupe, dispatcher, and emergency governance together, and
//! publishes the audit events. Every entry point either commits fully or
//! leaves the state exactly as it found it — mutations are staged on a
//! working copy and swapped in only on success, so a reentrant observer can
//! never see an invariant-violating intermediate state.

use crate::domain::cut::{stage_cut, FacetCut, InitCall};
use crate::domain::dispatcher::{resolve, Resolution};
use crate::domain::emergency::{self, GovernanceOutcome};
use crate::domain::registry::Facet;
use crate::domain::storage::{CallContext, ProxyState};
use crate::domain::value_objects::{Address, Bytes, Selector};
use crate::domain::{invariants, loupe};
use crate::errors::DiamondError;
use crate::events::{
    DiamondCutAppliedPayload, DiamondEvent, DiamondEventKind, EmergencyFacetRemovedPayload,
    EmergencyPausedPayload, EmergencyUnpausedPayload, OwnershipTransferredPayload,
    PauserChangedPayload,
};
use crate::ports::inbound::DiamondApi;
use crate::ports::outbound::{EventPublisher, FacetHost};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Diamond service configuration.
#[derive(Debug, Clone)]
pub struct DiamondConfig {
    /// Owner: exclusive rights to cuts, unpause, identity rotation.
    pub owner: Address,
    /// Pauser wallet: additionally permitted to pause and remove facets.
    pub pauser: Address,
    /// Address the built-in emergency governance facet answers at.
    pub emergency_facet: Address,
    /// Maximum accepted calldata size in bytes.
    pub max_calldata_bytes: usize,
}

impl DiamondConfig {
    /// Creates a configuration with the default calldata limit.
    #[must_use]
    pub fn new(owner: Address, pauser: Address, emergency_facet: Address) -> Self {
        Self {
            owner,
            pauser,
            emergency_facet,
            max_calldata_bytes: 128 * 1024,
        }
    }

    /// Validates the configuration for production use.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when owner, pauser, or emergency facet is the zero
    /// address, or when owner and pauser collapse into one identity.
    pub fn validate_for_production(&self) -> Result<(), DiamondError> {
        if self.owner.is_zero() {
            return Err(DiamondError::InvalidConfig(
                "owner cannot be the zero address".to_string(),
            ));
        }
        if self.pauser.is_zero() {
            return Err(DiamondError::InvalidConfig(
                "pauser cannot be the zero address".to_string(),
            ));
        }
        if self.owner == self.pauser {
            return Err(DiamondError::InvalidConfig(
                "owner and pauser must be distinct identities".to_string(),
            ));
        }
        if self.emergency_facet.is_zero() {
            return Err(DiamondError::InvalidConfig(
                "emergency facet cannot be the zero address".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Counters for the diamond service.
#[derive(Debug, Default, Clone)]
pub struct ServiceStats {
    /// Total fallback dispatches received.
    pub calls_dispatched: u64,
    /// Dispatches that reached a facet and returned successfully.
    pub calls_forwarded: u64,
    /// Dispatches that failed (unroutable, paused, or facet failure).
    pub failed_dispatches: u64,
    /// Privileged requests rejected as unauthorized.
    pub rejected_requests: u64,
    /// Cut batches applied.
    pub cuts_applied: u64,
    /// Completed pause → unpause cycles.
    pub pause_cycles: u64,
}

// =============================================================================
// SERVICE
// =============================================================================

/// The diamond proxy service.
pub struct DiamondService {
    config: DiamondConfig,
    state: ProxyState,
    host: Arc<dyn FacetHost>,
    publisher: Arc<dyn EventPublisher>,
    stats: ServiceStats,
}

impl DiamondService {
    /// Creates a service with an empty registry. The built-in emergency
    /// facet is addressable through dispatch from the first call without
    /// ever occupying registry slots, so the loupe reports only installed
    /// facets.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the configuration fails production validation.
    pub fn new(
        host: Arc<dyn FacetHost>,
        publisher: Arc<dyn EventPublisher>,
        config: DiamondConfig,
    ) -> Result<Self, DiamondError> {
        config.validate_for_production()?;
        let state = ProxyState::new(config.owner, config.pauser, config.emergency_facet);
        info!(owner = %config.owner, pauser = %config.pauser, "diamond service initialized");
        Ok(Self {
            config,
            state,
            host,
            publisher,
            stats: ServiceStats::default(),
        })
    }

    /// Current service statistics.
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        self.stats.clone()
    }

    /// Read access to the proxy state, for inspection and tests.
    #[must_use]
    pub fn state(&self) -> &ProxyState {
        &self.state
    }

    fn publish(&self, correlation_id: Uuid, kind: DiamondEventKind) {
        debug!(topic = kind.topic(), %correlation_id, "publishing event");
        self.publisher.publish(DiamondEvent {
            correlation_id,
            kind,
        });
    }

    /// Counts rejections and logs them before propagating the error.
    fn note_rejection(&mut self, err: &DiamondError) {
        if let DiamondError::Unauthorized { caller, operation } = err {
            warn!(caller = %caller, operation, "unauthorized privileged request");
            self.stats.rejected_requests += 1;
        }
    }

    /// Forwards a resolved call to its facet against a working copy of the
    /// state; the copy is committed only when the facet succeeds.
    fn forward(
        &mut self,
        facet: Address,
        ctx: &CallContext,
        calldata: &[u8],
    ) -> Result<Bytes, DiamondError> {
        let handler =
            self.host
                .handler(facet)
                .ok_or_else(|| DiamondError::ExternalCallFailed {
                    facet,
                    reason: "no code at facet address".to_string(),
                })?;

        let mut staged = self.state.clone();
        match handler.call(&mut staged, ctx, calldata) {
            Ok(output) => {
                self.state = staged;
                Ok(output)
            }
            Err(err) => Err(err.into_dispatch_error(facet)),
        }
    }

    /// Applies a governance call that arrived through the fallback path and
    /// publishes the matching event.
    fn dispatch_governance(
        &mut self,
        ctx: &CallContext,
        calldata: &[u8],
    ) -> Result<Bytes, DiamondError> {
        let outcome = emergency::handle_governance_call(&mut self.state, ctx.caller, calldata)
            .map_err(|err| {
                self.note_rejection(&err);
                err
            })?;
        match outcome {
            GovernanceOutcome::Paused => {
                info!(initiator = %ctx.caller, "routing halted via dispatch");
                self.publish(
                    ctx.call_id,
                    DiamondEventKind::EmergencyPaused(EmergencyPausedPayload {
                        initiator: ctx.caller,
                    }),
                );
            }
            GovernanceOutcome::Unpaused { blacklist, .. } => {
                info!(initiator = %ctx.caller, excluded = blacklist.len(), "routing restored via dispatch");
                self.stats.pause_cycles += 1;
                self.publish(
                    ctx.call_id,
                    DiamondEventKind::EmergencyUnpaused(EmergencyUnpausedPayload {
                        initiator: ctx.caller,
                        blacklist,
                    }),
                );
            }
            GovernanceOutcome::FacetRemoved { facet, selectors } => {
                info!(facet = %facet, removed = selectors.len(), "facet removed via dispatch");
                self.publish(
                    ctx.call_id,
                    DiamondEventKind::EmergencyFacetRemoved(EmergencyFacetRemovedPayload {
                        facet_address: facet,
                        selectors,
                        initiator: ctx.caller,
                    }),
                );
            }
        }
        Ok(Bytes::new())
    }
}

impl DiamondApi for DiamondService {
    #[instrument(skip(self, cuts, init), fields(caller = %caller, operations = cuts.len()))]
    fn apply_cut(
        &mut self,
        caller: Address,
        cuts: Vec<FacetCut>,
        init: Option<InitCall>,
    ) -> Result<(), DiamondError> {
        self.state
            .diamond
            .ensure_owner(caller, "diamondCut")
            .map_err(|err| {
                self.note_rejection(&err);
                err
            })?;

        // Governance selectors are served by the built-in facet and can
        // never be shadowed by a cut.
        let reserved = emergency::abi::selectors();
        for cut in &cuts {
            if let Some(selector) = cut.selectors.iter().find(|s| reserved.contains(s)) {
                return Err(DiamondError::InvalidConfig(format!(
                    "selector {selector} is reserved for emergency governance"
                )));
            }
        }

        let staged_registry = stage_cut(&self.state.diamond.registry, &cuts, |facet| {
            self.host.has_code(facet)
        })?;

        // Stage the full state so a failed init call rolls everything back,
        // including registry changes and any slots the init touched.
        let mut staged = self.state.clone();
        staged.diamond.registry = staged_registry;

        if let Some(ref init_call) = init {
            let handler = self.host.handler(init_call.target).ok_or_else(|| {
                DiamondError::InvalidConfig(format!(
                    "init target {:?} has no code deployed",
                    init_call.target
                ))
            })?;
            let ctx = CallContext::new(caller);
            handler
                .call(&mut staged, &ctx, init_call.calldata.as_slice())
                .map_err(|err| err.into_dispatch_error(init_call.target))?;
        }

        debug_assert!(invariants::check_all_invariants(&staged.diamond.registry).is_valid());
        self.state = staged;
        self.stats.cuts_applied += 1;

        info!(operations = cuts.len(), "cut batch applied");
        self.publish(
            Uuid::new_v4(),
            DiamondEventKind::DiamondCutApplied(DiamondCutAppliedPayload {
                cuts,
                init,
                initiator: caller,
            }),
        );
        Ok(())
    }

    #[instrument(skip(self, calldata), fields(caller = %caller, len = calldata.len()))]
    fn dispatch(&mut self, caller: Address, calldata: &[u8]) -> Result<Bytes, DiamondError> {
        self.stats.calls_dispatched += 1;

        if calldata.len() > self.config.max_calldata_bytes {
            self.stats.failed_dispatches += 1;
            return Err(DiamondError::MalformedCalldata(format!(
                "calldata exceeds {} bytes",
                self.config.max_calldata_bytes
            )));
        }
        let Some(selector) = Selector::from_calldata(calldata) else {
            self.stats.failed_dispatches += 1;
            return Err(DiamondError::MalformedCalldata(
                "payload shorter than a selector".to_string(),
            ));
        };

        let ctx = CallContext::new(caller);
        // Governance selectors bypass the registry and the pause gate, so
        // incident response stays reachable while routing is halted.
        let result = if emergency::abi::selectors().contains(&selector) {
            self.dispatch_governance(&ctx, calldata)
        } else {
            match resolve(&self.state.diamond, selector) {
                Resolution::NotFound => Err(DiamondError::FunctionDoesNotExist(selector)),
                Resolution::Paused => Err(DiamondError::DiamondIsPaused),
                Resolution::Forward(facet) => {
                    debug!(selector = %selector, facet = %facet, "forwarding call");
                    if facet == self.state.diamond.emergency_facet {
                        self.dispatch_governance(&ctx, calldata)
                    } else {
                        self.forward(facet, &ctx, calldata)
                    }
                }
            }
        };

        match &result {
            Ok(_) => self.stats.calls_forwarded += 1,
            Err(_) => self.stats.failed_dispatches += 1,
        }
        result
    }

    fn facets(&self) -> Vec<Facet> {
        loupe::facets(&self.state.diamond.registry)
    }

    fn facet_function_selectors(&self, facet: Address) -> Vec<Selector> {
        loupe::facet_function_selectors(&self.state.diamond.registry, facet)
    }

    fn facet_addresses(&self) -> Vec<Address> {
        loupe::facet_addresses(&self.state.diamond.registry)
    }

    fn facet_address(&self, selector: Selector) -> Address {
        loupe::facet_address(&self.state.diamond.registry, selector)
    }

    #[instrument(skip(self), fields(caller = %caller))]
    fn pause(&mut self, caller: Address) -> Result<(), DiamondError> {
        emergency::pause(&mut self.state, caller).map_err(|err| {
            self.note_rejection(&err);
            err
        })?;
        info!(initiator = %caller, "routing halted");
        self.publish(
            Uuid::new_v4(),
            DiamondEventKind::EmergencyPaused(EmergencyPausedPayload { initiator: caller }),
        );
        Ok(())
    }

    #[instrument(skip(self, blacklist), fields(caller = %caller, excluded = blacklist.len()))]
    fn unpause(&mut self, caller: Address, blacklist: Vec<Address>) -> Result<(), DiamondError> {
        emergency::unpause(&mut self.state, caller, &blacklist).map_err(|err| {
            self.note_rejection(&err);
            err
        })?;
        self.stats.pause_cycles += 1;
        info!(initiator = %caller, excluded = blacklist.len(), "routing restored");
        self.publish(
            Uuid::new_v4(),
            DiamondEventKind::EmergencyUnpaused(EmergencyUnpausedPayload {
                initiator: caller,
                blacklist,
            }),
        );
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %caller, facet = %facet))]
    fn remove_facet(&mut self, caller: Address, facet: Address) -> Result<(), DiamondError> {
        let selectors = emergency::remove_facet(&mut self.state, caller, facet).map_err(|err| {
            self.note_rejection(&err);
            err
        })?;
        info!(facet = %facet, removed = selectors.len(), "facet removed");
        self.publish(
            Uuid::new_v4(),
            DiamondEventKind::EmergencyFacetRemoved(EmergencyFacetRemovedPayload {
                facet_address: facet,
                selectors,
                initiator: caller,
            }),
        );
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %caller, new_owner = %new_owner))]
    fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), DiamondError> {
        let previous =
            emergency::transfer_ownership(&mut self.state, caller, new_owner).map_err(|err| {
                self.note_rejection(&err);
                err
            })?;
        info!(previous = %previous, new = %new_owner, "ownership transferred");
        self.publish(
            Uuid::new_v4(),
            DiamondEventKind::OwnershipTransferred(OwnershipTransferredPayload {
                previous_owner: previous,
                new_owner,
            }),
        );
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %caller, new_pauser = %new_pauser))]
    fn set_pauser(&mut self, caller: Address, new_pauser: Address) -> Result<(), DiamondError> {
        let previous =
            emergency::set_pauser(&mut self.state, caller, new_pauser).map_err(|err| {
                self.note_rejection(&err);
                err
            })?;
        info!(previous = %previous, new = %new_pauser, "pauser rotated");
        self.publish(
            Uuid::new_v4(),
            DiamondEventKind::PauserChanged(PauserChangedPayload {
                previous_pauser: previous,
                new_pauser,
            }),
        );
        Ok(())
    }

    fn is_paused(&self) -> bool {
        self.state.diamond.paused
    }
}

// =============================================================================
// TEST FIXTURES
// =============================================================================

/// Default identities for a test service.
pub mod test_identities {
    use crate::domain::value_objects::Address;

    /// Test owner.
    pub const OWNER: Address = Address([0x01; 20]);
    /// Test pauser wallet.
    pub const PAUSER: Address = Address([0x02; 20]);
    /// Built-in emergency facet address.
    pub const EMERGENCY_FACET: Address = Address([0xEE; 20]);
    /// An address with no privileges.
    pub const OUTSIDER: Address = Address([0x99; 20]);
}

/// Create a service wired to fresh in-memory adapters (for testing).
#[must_use]
pub fn create_test_service() -> (
    DiamondService,
    Arc<crate::adapters::InMemoryFacetHost>,
    Arc<crate::adapters::InMemoryEventPublisher>,
) {
    let host = Arc::new(crate::adapters::InMemoryFacetHost::new());
    let publisher = Arc::new(crate::adapters::InMemoryEventPublisher::new());
    let config = DiamondConfig::new(
        test_identities::OWNER,
        test_identities::PAUSER,
        test_identities::EMERGENCY_FACET,
    );
    let service = DiamondService::new(
        Arc::clone(&host) as Arc<dyn FacetHost>,
        Arc::clone(&publisher) as Arc<dyn EventPublisher>,
        config,
    )
    .unwrap_or_else(|err| panic!("test config must validate: {err}"));
    (service, host, publisher)
}

// =============================================================================
// TESTS
// =============================================================================
