//! # Emergency Governance Flows
//!
//! Pause and unpause cycles, selective blacklist restoration, permanent
//! facet removal, and the full authorization matrix, exercised both through
//! the typed surface and through raw governance calldata on the fallback
//! path.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use diamond_core::adapters::EchoFacet;
    use diamond_core::prelude::*;
    use diamond_core::service::create_test_service;
    use std::sync::Arc;

    // =============================================================================
    // PAUSE / UNPAUSE CYCLES
    // =============================================================================

    #[test]
    fn test_three_pause_cycles_leave_routing_intact() {
        let (mut service, _, _) = service_with_two_facets();
        let loupe_before = service.facets();

        for _ in 0..3 {
            service.pause(PAUSER).unwrap();
            // Loupe answers identically while paused.
            assert_eq!(service.facets(), loupe_before);
            assert_eq!(
                service.dispatch(OUTSIDER, sel(0xA1).as_bytes()),
                Err(DiamondError::DiamondIsPaused)
            );
            service.unpause(OWNER, vec![]).unwrap();
            assert!(service.dispatch(OUTSIDER, sel(0xA1).as_bytes()).is_ok());
        }

        assert_eq!(service.facets(), loupe_before);
        assert_eq!(service.stats().pause_cycles, 3);
    }

    #[test]
    fn test_pause_is_idempotent_guarded() {
        let (mut service, _, _) = service_with_two_facets();
        service.pause(OWNER).unwrap();
        assert_eq!(service.pause(OWNER), Err(DiamondError::DiamondIsPaused));
        assert_eq!(
            service.unpause(OWNER, vec![]).and_then(|()| service.unpause(OWNER, vec![])),
            Err(DiamondError::DiamondNotPaused)
        );
    }

    #[test]
    fn test_unknown_selector_reports_not_found_even_while_paused() {
        let (mut service, _, _) = service_with_two_facets();
        service.pause(PAUSER).unwrap();
        assert_eq!(
            service.dispatch(OUTSIDER, sel(0x99).as_bytes()),
            Err(DiamondError::FunctionDoesNotExist(sel(0x99)))
        );
    }

    // =============================================================================
    // SELECTIVE BLACKLIST
    // =============================================================================

    #[test]
    fn test_unpause_blacklist_excludes_compromised_facet() {
        // Facet A serves two selectors, facet B serves one. Unpausing with A
        // blacklisted must leave only B routable and drop A from the loupe.
        let (mut service, _, _) = service_with_two_facets();
        service.pause(PAUSER).unwrap();
        service.unpause(OWNER, vec![addr(0xA)]).unwrap();

        assert_eq!(service.facet_addresses(), vec![addr(0xB)]);
        assert_eq!(service.facet_address(sel(0xA1)), Address::ZERO);
        assert_eq!(service.facet_address(sel(0xA2)), Address::ZERO);
        assert_eq!(service.facet_address(sel(0xB1)), addr(0xB));
        assert_eq!(
            service.dispatch(OUTSIDER, sel(0xA1).as_bytes()),
            Err(DiamondError::FunctionDoesNotExist(sel(0xA1)))
        );
        assert!(service.dispatch(OUTSIDER, sel(0xB1).as_bytes()).is_ok());
        assert!(check_all_invariants(&service.state().diamond.registry).is_valid());
    }

    #[test]
    fn test_unpause_with_unknown_blacklist_entry_is_benign() {
        let (mut service, _, _) = service_with_two_facets();
        service.pause(PAUSER).unwrap();
        service.unpause(OWNER, vec![addr(0x55)]).unwrap();
        assert!(!service.is_paused());
        assert!(service.facet_addresses().contains(&addr(0xA)));
        assert!(service.facet_addresses().contains(&addr(0xB)));
    }

    // =============================================================================
    // FACET REMOVAL
    // =============================================================================

    #[test]
    fn test_remove_facet_deletes_routing_while_paused() {
        let (mut service, _, _) = service_with_two_facets();
        service.pause(PAUSER).unwrap();
        service.remove_facet(PAUSER, addr(0xA)).unwrap();
        service.unpause(OWNER, vec![]).unwrap();

        assert_eq!(service.facet_addresses(), vec![addr(0xB)]);
        assert_eq!(service.facet_address(sel(0xA1)), Address::ZERO);
    }

    #[test]
    fn test_remove_unknown_facet_fails() {
        let (mut service, _, _) = service_with_two_facets();
        assert_eq!(
            service.remove_facet(OWNER, addr(0x55)),
            Err(DiamondError::FacetNotRegistered(addr(0x55)))
        );
    }

    #[test]
    fn test_emergency_facet_cannot_be_removed() {
        let (mut service, _, _) = service_with_two_facets();
        assert!(matches!(
            service.remove_facet(OWNER, EMERGENCY_FACET),
            Err(DiamondError::InvalidConfig(_))
        ));
    }

    // =============================================================================
    // AUTHORIZATION MATRIX
    // =============================================================================

    #[test]
    fn test_authorization_matrix() {
        let (mut service, host, _) = service_with_two_facets();
        host.deploy(addr(0xC), Arc::new(EchoFacet));
        let cut = vec![add_cut(addr(0xC), vec![sel(0xC1)])];

        // diamondCut: owner only.
        assert!(matches!(
            service.apply_cut(PAUSER, cut.clone(), None),
            Err(DiamondError::Unauthorized { .. })
        ));
        assert!(matches!(
            service.apply_cut(OUTSIDER, cut.clone(), None),
            Err(DiamondError::Unauthorized { .. })
        ));
        assert!(service.apply_cut(OWNER, cut, None).is_ok());

        // pause: owner or pauser.
        assert!(matches!(
            service.pause(OUTSIDER),
            Err(DiamondError::Unauthorized { .. })
        ));
        assert!(service.pause(PAUSER).is_ok());

        // unpause: owner only, pauser explicitly excluded.
        assert!(matches!(
            service.unpause(PAUSER, vec![]),
            Err(DiamondError::Unauthorized { .. })
        ));
        assert!(matches!(
            service.unpause(OUTSIDER, vec![]),
            Err(DiamondError::Unauthorized { .. })
        ));
        assert!(service.unpause(OWNER, vec![]).is_ok());

        // removeFacet: owner or pauser, never outsiders.
        assert!(matches!(
            service.remove_facet(OUTSIDER, addr(0xC)),
            Err(DiamondError::Unauthorized { .. })
        ));
        assert!(service.remove_facet(PAUSER, addr(0xC)).is_ok());

        // identity rotation: owner only.
        assert!(matches!(
            service.transfer_ownership(PAUSER, addr(0x33)),
            Err(DiamondError::Unauthorized { .. })
        ));
        assert!(matches!(
            service.set_pauser(PAUSER, addr(0x44)),
            Err(DiamondError::Unauthorized { .. })
        ));

        assert_eq!(service.stats().rejected_requests, 8);
    }

    // =============================================================================
    // GOVERNANCE THROUGH THE FALLBACK PATH
    // =============================================================================

    #[test]
    fn test_full_incident_response_via_dispatch_calldata() {
        let (mut service, _, publisher) = service_with_two_facets();

        // Pauser halts routing with raw calldata.
        service
            .dispatch(PAUSER, &emergency::abi::pause_calldata())
            .unwrap();
        assert!(service.is_paused());

        // Application traffic is gated, governance traffic is not.
        assert_eq!(
            service.dispatch(OUTSIDER, sel(0xA1).as_bytes()),
            Err(DiamondError::DiamondIsPaused)
        );

        // Pauser excises the compromised facet, still through dispatch.
        service
            .dispatch(PAUSER, &emergency::abi::remove_facet_calldata(addr(0xA)))
            .unwrap();

        // Owner restores routing, blacklisting nothing further.
        service
            .dispatch(OWNER, &emergency::abi::unpause_calldata(&[]))
            .unwrap();
        assert!(!service.is_paused());
        assert_eq!(service.facet_addresses(), vec![addr(0xB)]);

        let kinds: Vec<&'static str> = publisher.events().iter().map(|e| e.kind.topic()).collect();
        assert!(kinds.contains(&topics::EMERGENCY_PAUSED));
        assert!(kinds.contains(&topics::EMERGENCY_FACET_REMOVED));
        assert!(kinds.contains(&topics::EMERGENCY_UNPAUSED));
    }

    #[test]
    fn test_governance_dispatch_still_enforces_authorization() {
        let (mut service, _, _) = service_with_two_facets();
        assert!(matches!(
            service.dispatch(OUTSIDER, &emergency::abi::pause_calldata()),
            Err(DiamondError::Unauthorized { .. })
        ));
        assert!(!service.is_paused());
    }

    #[test]
    fn test_unpause_calldata_carries_blacklist() {
        let (mut service, _, _) = service_with_two_facets();
        service.pause(OWNER).unwrap();
        service
            .dispatch(OWNER, &emergency::abi::unpause_calldata(&[addr(0xA)]))
            .unwrap();
        assert_eq!(service.facet_addresses(), vec![addr(0xB)]);
    }

    #[test]
    fn test_unpause_dispatch_rejects_oversized_length_word() {
        let (mut service, _, _) = service_with_two_facets();
        service.pause(OWNER).unwrap();

        // unpause(address[]) calldata whose length word claims 2^63 elements.
        // Any caller can send this; it must fail cleanly, not allocate.
        let mut calldata = emergency::abi::unpause_selector().as_bytes().to_vec();
        calldata.extend_from_slice(&diamond_core::domain::services::encode_usize_word(32));
        let mut length_word = [0u8; 32];
        length_word[24] = 0x80;
        calldata.extend_from_slice(&length_word);

        assert!(matches!(
            service.dispatch(OUTSIDER, &calldata),
            Err(DiamondError::MalformedCalldata(_))
        ));
        assert!(service.is_paused());
    }

    #[test]
    fn test_governance_dispatch_rejects_malformed_arguments() {
        let (mut service, _, _) = service_with_two_facets();
        // removeFacet with a truncated argument word.
        let mut calldata = emergency::abi::remove_facet_selector().as_bytes().to_vec();
        calldata.extend_from_slice(&[0u8; 16]);
        assert!(matches!(
            service.dispatch(OWNER, &calldata),
            Err(DiamondError::MalformedCalldata(_))
        ));
    }
}
