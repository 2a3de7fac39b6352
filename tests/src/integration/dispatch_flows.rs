//! # Fallback Dispatch Flows
//!
//! Exercises the fallback path end to end: selector extraction, registry
//! lookup, forwarding against shared storage, and failure reporting.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use diamond_core::adapters::{CounterFacet, EchoFacet, InMemoryEventPublisher, InMemoryFacetHost};
    use diamond_core::prelude::*;
    use diamond_core::service::create_test_service;
    use std::sync::Arc;

    #[test]
    fn test_registered_selector_forwards_unknown_rejects() {
        let (mut service, host, _) = create_test_service();
        host.deploy(addr(0xA), Arc::new(EchoFacet));
        service
            .apply_cut(
                OWNER,
                vec![add_cut(addr(0xA), vec![Selector::new([0xAA, 0xBB, 0xCC, 0xDD])])],
                None,
            )
            .unwrap();

        let output = service
            .dispatch(OUTSIDER, &[0xAA, 0xBB, 0xCC, 0xDD, 0x01, 0x02])
            .unwrap();
        assert_eq!(output.as_slice(), &[0xAA, 0xBB, 0xCC, 0xDD, 0x01, 0x02]);

        let err = service.dispatch(OUTSIDER, &[0x11, 0x22, 0x33, 0x44]).unwrap_err();
        assert_eq!(
            err,
            DiamondError::FunctionDoesNotExist(Selector::new([0x11, 0x22, 0x33, 0x44]))
        );
    }

    #[test]
    fn test_dispatch_rejects_truncated_calldata() {
        let (mut service, _, _) = create_test_service();
        for len in 0..4 {
            let calldata = vec![0xAB; len];
            assert!(matches!(
                service.dispatch(OUTSIDER, &calldata),
                Err(DiamondError::MalformedCalldata(_))
            ));
        }
    }

    #[test]
    fn test_dispatch_rejects_calldata_over_configured_limit() {
        let host = Arc::new(InMemoryFacetHost::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let mut config = DiamondConfig::new(OWNER, PAUSER, EMERGENCY_FACET);
        config.max_calldata_bytes = 64;
        let mut service = DiamondService::new(
            Arc::clone(&host) as Arc<dyn FacetHost>,
            publisher as Arc<dyn EventPublisher>,
            config,
        )
        .unwrap();

        host.deploy(addr(0xA), Arc::new(EchoFacet));
        service
            .apply_cut(OWNER, vec![add_cut(addr(0xA), vec![sel(0xA1)])], None)
            .unwrap();

        // At the limit the call goes through; one byte over is rejected
        // before any registry lookup.
        let mut calldata = sel(0xA1).as_bytes().to_vec();
        calldata.resize(64, 0);
        assert!(service.dispatch(OUTSIDER, &calldata).is_ok());

        calldata.push(0);
        assert!(matches!(
            service.dispatch(OUTSIDER, &calldata),
            Err(DiamondError::MalformedCalldata(_))
        ));
        assert_eq!(service.stats().failed_dispatches, 1);
    }

    #[test]
    fn test_facets_share_proxy_slot_storage() {
        let (mut service, host, _) = create_test_service();
        let slot = StorageKey::from_u256(U256::from(42));
        // Two distinct facet addresses backed by counters on the same slot:
        // writes made through one must be visible through the other.
        host.deploy(addr(0xA), Arc::new(CounterFacet { slot }));
        host.deploy(addr(0xB), Arc::new(CounterFacet { slot }));
        service
            .apply_cut(
                OWNER,
                vec![
                    add_cut(addr(0xA), vec![sel(0xA1)]),
                    add_cut(addr(0xB), vec![sel(0xB1)]),
                ],
                None,
            )
            .unwrap();

        service.dispatch(OUTSIDER, sel(0xA1).as_bytes()).unwrap();
        let output = service.dispatch(OUTSIDER, sel(0xB1).as_bytes()).unwrap();
        assert_eq!(
            StorageValue::new(output.as_slice().try_into().unwrap()).to_u256(),
            U256::from(2)
        );
    }

    #[test]
    fn test_slot_writes_never_touch_routing_state() {
        let (mut service, host, _) = create_test_service();
        let slot = StorageKey::new(diamond_storage_position().0);
        host.deploy(addr(0xA), Arc::new(CounterFacet { slot }));
        service
            .apply_cut(OWNER, vec![add_cut(addr(0xA), vec![sel(0xA1)])], None)
            .unwrap();

        let facets_before = service.facets();
        let owner_before = service.state().diamond.owner;

        // Even a write aimed at the reserved diamond position lands in the
        // facet slot map, not in the routing structures.
        service.dispatch(OUTSIDER, sel(0xA1).as_bytes()).unwrap();

        assert_eq!(service.facets(), facets_before);
        assert_eq!(service.state().diamond.owner, owner_before);
        assert!(!service.is_paused());
    }

    #[test]
    fn test_dispatch_after_facet_undeploy_reports_call_failure() {
        let (mut service, host, _) = service_with_two_facets();
        host.undeploy(addr(0xA));

        let err = service.dispatch(OUTSIDER, sel(0xA1).as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DiamondError::ExternalCallFailed { facet, .. } if facet == addr(0xA)
        ));
    }

    #[test]
    fn test_dispatch_stats_track_outcomes() {
        let (mut service, _, _) = service_with_two_facets();
        service.dispatch(OUTSIDER, sel(0xA1).as_bytes()).unwrap();
        service.dispatch(OUTSIDER, sel(0xA2).as_bytes()).unwrap();
        let _ = service.dispatch(OUTSIDER, sel(0x99).as_bytes());

        let stats = service.stats();
        assert_eq!(stats.calls_dispatched, 3);
        assert_eq!(stats.calls_forwarded, 2);
        assert_eq!(stats.failed_dispatches, 1);
    }
}
