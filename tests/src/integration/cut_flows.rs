//! # Cut Protocol Flows
//!
//! Exercises diamond cut batches end to end: routing table rewrites must be
//! observable through the loupe immediately, must keep the registry
//! invariants, and must commit all-or-nothing.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use diamond_core::adapters::{EchoFacet, RevertingFacet};
    use diamond_core::domain::cut::InitCall;
    use diamond_core::prelude::*;
    use diamond_core::service::create_test_service;
    use std::sync::Arc;

    #[test]
    fn test_cut_sequence_preserves_registry_invariants() {
        let (mut service, host, _) = service_with_two_facets();
        host.deploy(addr(0xC), Arc::new(EchoFacet));

        // Add, replace, remove in separate batches; audit after each.
        service
            .apply_cut(OWNER, vec![add_cut(addr(0xC), vec![sel(0xC1)])], None)
            .unwrap();
        assert!(check_all_invariants(&service.state().diamond.registry).is_valid());

        service
            .apply_cut(OWNER, vec![replace_cut(addr(0xC), vec![sel(0xA1)])], None)
            .unwrap();
        assert!(check_all_invariants(&service.state().diamond.registry).is_valid());
        assert_eq!(service.facet_address(sel(0xA1)), addr(0xC));

        service
            .apply_cut(OWNER, vec![remove_cut(vec![sel(0xB1)])], None)
            .unwrap();
        assert!(check_all_invariants(&service.state().diamond.registry).is_valid());
        assert_eq!(service.facet_address(sel(0xB1)), Address::ZERO);
        // Facet B lost its last selector, so it leaves the facet list.
        assert!(!service.facet_addresses().contains(&addr(0xB)));
    }

    #[test]
    fn test_loupe_reflects_cut_immediately() {
        let (mut service, host, _) = create_test_service();
        host.deploy(addr(0xA), Arc::new(EchoFacet));

        service
            .apply_cut(OWNER, vec![add_cut(addr(0xA), vec![sel(1), sel(2)])], None)
            .unwrap();

        let facets = service.facets();
        let entry = facets
            .iter()
            .find(|f| f.facet_address == addr(0xA))
            .expect("facet A must be listed");
        assert_eq!(entry.selectors, vec![sel(1), sel(2)]);
        assert_eq!(service.facet_function_selectors(addr(0xA)), vec![sel(1), sel(2)]);
        assert_eq!(service.facet_address(sel(1)), addr(0xA));
    }

    #[test]
    fn test_failing_batch_stages_nothing() {
        let (mut service, host, _) = service_with_two_facets();
        host.deploy(addr(0xC), Arc::new(EchoFacet));
        let before = service.facets();

        // Second operation collides with an existing route, so the valid
        // first operation must not survive either.
        let err = service
            .apply_cut(
                OWNER,
                vec![
                    add_cut(addr(0xC), vec![sel(0xC1)]),
                    add_cut(addr(0xC), vec![sel(0xA1)]),
                ],
                None,
            )
            .unwrap_err();
        assert!(matches!(err, DiamondError::AlreadyRegistered { .. }));
        assert_eq!(service.facets(), before);
        assert_eq!(service.facet_address(sel(0xC1)), Address::ZERO);
    }

    #[test]
    fn test_failing_init_call_reverts_batch_and_slots() {
        let (mut service, host, _) = service_with_two_facets();
        host.deploy(addr(0xC), Arc::new(EchoFacet));
        host.deploy(addr(0xD), Arc::new(RevertingFacet { reason: "migration failed" }));
        let before = service.facets();
        let slots_before = service.state().slot_count();

        let err = service
            .apply_cut(
                OWNER,
                vec![add_cut(addr(0xC), vec![sel(0xC1)])],
                Some(InitCall {
                    target: addr(0xD),
                    calldata: Bytes::new(),
                }),
            )
            .unwrap_err();
        assert!(matches!(err, DiamondError::ExternalCallFailed { .. }));
        assert_eq!(service.facets(), before);
        assert_eq!(service.state().slot_count(), slots_before);
    }

    #[test]
    fn test_remove_requires_zero_facet_address() {
        let (mut service, _, _) = service_with_two_facets();
        let mut cut = remove_cut(vec![sel(0xA1)]);
        cut.facet_address = addr(0xA);
        let err = service.apply_cut(OWNER, vec![cut], None).unwrap_err();
        assert!(matches!(err, DiamondError::InvalidConfig(_)));
        assert_eq!(service.facet_address(sel(0xA1)), addr(0xA));
    }

    #[test]
    fn test_empty_batch_rejected() {
        let (mut service, _, _) = service_with_two_facets();
        assert!(matches!(
            service.apply_cut(OWNER, vec![], None),
            Err(DiamondError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_cut_rejects_selectors_for_undeployed_facet() {
        let (mut service, _, _) = service_with_two_facets();
        let err = service
            .apply_cut(OWNER, vec![add_cut(addr(0x7F), vec![sel(0x7F)])], None)
            .unwrap_err();
        assert!(matches!(err, DiamondError::InvalidConfig(_)));
    }

    #[test]
    fn test_replace_then_dispatch_routes_to_new_facet() {
        let (mut service, host, _) = service_with_two_facets();
        host.deploy(addr(0xC), Arc::new(RevertingFacet { reason: "v2 reverts" }));

        service
            .apply_cut(OWNER, vec![replace_cut(addr(0xC), vec![sel(0xA1)])], None)
            .unwrap();

        // Same selector now reaches the replacement implementation.
        let err = service.dispatch(OUTSIDER, sel(0xA1).as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DiamondError::ExternalCallFailed { facet, .. } if facet == addr(0xC)
        ));
    }
}
