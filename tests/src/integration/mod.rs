//! End-to-end flows exercising the diamond service through its public port.

pub mod cut_flows;
pub mod dispatch_flows;
pub mod emergency_flows;

#[cfg(test)]
pub(crate) mod fixtures {
    use diamond_core::adapters::{EchoFacet, InMemoryEventPublisher, InMemoryFacetHost};
    use diamond_core::domain::cut::{FacetCut, FacetCutAction};
    use diamond_core::prelude::*;
    use diamond_core::service::{create_test_service, test_identities, DiamondService};
    use std::sync::Arc;

    pub use diamond_core::service::test_identities::{EMERGENCY_FACET, OUTSIDER, OWNER, PAUSER};

    /// Installs the dev log subscriber once; later calls are no-ops.
    /// Run with `RUST_LOG=diamond_core=debug` to watch dispatch decisions.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    pub fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    pub fn sel(n: u8) -> Selector {
        Selector::new([n, n, n, n])
    }

    pub fn add_cut(facet: Address, selectors: Vec<Selector>) -> FacetCut {
        FacetCut {
            facet_address: facet,
            action: FacetCutAction::Add,
            selectors,
        }
    }

    pub fn remove_cut(selectors: Vec<Selector>) -> FacetCut {
        FacetCut {
            facet_address: Address::ZERO,
            action: FacetCutAction::Remove,
            selectors,
        }
    }

    pub fn replace_cut(facet: Address, selectors: Vec<Selector>) -> FacetCut {
        FacetCut {
            facet_address: facet,
            action: FacetCutAction::Replace,
            selectors,
        }
    }

    /// Service with two echo facets installed:
    /// facet A serves selectors 0xA1/0xA2, facet B serves 0xB1.
    pub fn service_with_two_facets() -> (
        DiamondService,
        Arc<InMemoryFacetHost>,
        Arc<InMemoryEventPublisher>,
    ) {
        init_tracing();
        let (mut service, host, publisher) = create_test_service();
        host.deploy(addr(0xA), Arc::new(EchoFacet));
        host.deploy(addr(0xB), Arc::new(EchoFacet));
        service
            .apply_cut(
                OWNER,
                vec![
                    add_cut(addr(0xA), vec![sel(0xA1), sel(0xA2)]),
                    add_cut(addr(0xB), vec![sel(0xB1)]),
                ],
                None,
            )
            .expect("initial cut must apply");
        (service, host, publisher)
    }
}
