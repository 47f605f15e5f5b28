//! Access controller behaviour over in-memory stores.
//!
//! Covers every denial path, the catalog outcomes for eligible users, lookup
//! short-circuiting, store failure propagation, and idempotence.
//!
//! Run with: `cargo test -p hotel-gate-testing --test access_controller_test`

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use hotel_gate_core::types::{HotelId, TicketId, TicketStatus, TicketTypeId, UserId};
use hotel_gate_core::{AccessError, DenialReason, GateResult, StoreError};
use hotel_gate_testing::{AccessScenario, Lookup, LookupKind, init_test_tracing};
use proptest::prelude::*;

const USER: i32 = 7;

// ============================================================================
// Denial paths
// ============================================================================

#[tokio::test]
async fn test_not_enrolled_is_not_found() {
    init_test_tracing();
    let scenario = AccessScenario::for_user(USER).with_hotel(1, "hotel 1").build();

    let list = scenario.controller.get_hotels(scenario.user_id).await.unwrap();
    let single = scenario
        .controller
        .get_hotel(scenario.user_id, HotelId::new(1))
        .await
        .unwrap();

    assert_eq!(list, GateResult::Denied(DenialReason::NotFound));
    assert_eq!(single, GateResult::Denied(DenialReason::NotFound));
}

#[tokio::test]
async fn test_enrolled_without_ticket_is_not_found() {
    let scenario = AccessScenario::for_user(USER)
        .enrolled()
        .with_hotel(1, "hotel 1")
        .build();

    let list = scenario.controller.get_hotels(scenario.user_id).await.unwrap();
    let single = scenario
        .controller
        .get_hotel(scenario.user_id, HotelId::new(1))
        .await
        .unwrap();

    assert_eq!(list, GateResult::Denied(DenialReason::NotFound));
    assert_eq!(single, GateResult::Denied(DenialReason::NotFound));
}

#[tokio::test]
async fn test_reserved_ticket_requires_payment_even_for_remote_type() {
    // Payment is checked before the ticket class.
    let scenario = AccessScenario::for_user(USER)
        .enrolled()
        .with_ticket(TicketStatus::Reserved, true, false)
        .with_hotel(1, "hotel 1")
        .build();

    let list = scenario.controller.get_hotels(scenario.user_id).await.unwrap();
    assert_eq!(list, GateResult::Denied(DenialReason::PaymentRequired));
}

#[tokio::test]
async fn test_paid_remote_ticket_requires_payment() {
    let scenario = AccessScenario::for_user(USER)
        .enrolled()
        .with_ticket(TicketStatus::Paid, true, true)
        .with_hotel(1, "hotel 1")
        .build();

    let list = scenario.controller.get_hotels(scenario.user_id).await.unwrap();
    let single = scenario
        .controller
        .get_hotel(scenario.user_id, HotelId::new(1))
        .await
        .unwrap();

    assert_eq!(list, GateResult::Denied(DenialReason::PaymentRequired));
    assert_eq!(single, GateResult::Denied(DenialReason::PaymentRequired));
}

#[tokio::test]
async fn test_paid_ticket_without_hotel_requires_payment() {
    let scenario = AccessScenario::for_user(USER)
        .enrolled()
        .with_ticket(TicketStatus::Paid, false, false)
        .with_hotel(1, "hotel 1")
        .build();

    let list = scenario.controller.get_hotels(scenario.user_id).await.unwrap();
    let single = scenario
        .controller
        .get_hotel(scenario.user_id, HotelId::new(1))
        .await
        .unwrap();

    assert_eq!(list, GateResult::Denied(DenialReason::PaymentRequired));
    assert_eq!(single, GateResult::Denied(DenialReason::PaymentRequired));
}

// ============================================================================
// Eligible users
// ============================================================================

#[tokio::test]
async fn test_eligible_user_lists_all_hotels_in_store_order() {
    let scenario = AccessScenario::for_user(USER)
        .eligible()
        .with_hotel(2, "hotel 2")
        .with_hotel(1, "hotel 1")
        .build();

    let hotels = scenario
        .controller
        .get_hotels(scenario.user_id)
        .await
        .unwrap()
        .into_found()
        .expect("eligible user should see hotels");

    let names: Vec<&str> = hotels.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["hotel 2", "hotel 1"]);
}

#[tokio::test]
async fn test_eligible_user_with_empty_catalog_is_not_found() {
    let scenario = AccessScenario::for_user(USER).eligible().build();

    let list = scenario.controller.get_hotels(scenario.user_id).await.unwrap();
    assert_eq!(list, GateResult::Denied(DenialReason::NotFound));
}

#[tokio::test]
async fn test_eligible_user_gets_hotel_with_rooms() {
    let scenario = AccessScenario::for_user(USER)
        .eligible()
        .with_hotel(1, "hotel 1")
        .with_room(11, 1, "101", 2)
        .with_room(12, 1, "102", 3)
        .with_room(21, 2, "201", 1)
        .build();

    let hotel = scenario
        .controller
        .get_hotel(scenario.user_id, HotelId::new(1))
        .await
        .unwrap()
        .into_found()
        .expect("hotel 1 exists");

    assert_eq!(hotel.hotel.name, "hotel 1");
    let rooms: Vec<&str> = hotel.rooms.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(rooms, vec!["101", "102"]);
}

#[tokio::test]
async fn test_eligible_user_unknown_hotel_is_not_found() {
    let scenario = AccessScenario::for_user(USER)
        .eligible()
        .with_hotel(1, "hotel 1")
        .build();

    let single = scenario
        .controller
        .get_hotel(scenario.user_id, HotelId::new(99))
        .await
        .unwrap();
    assert_eq!(single, GateResult::Denied(DenialReason::NotFound));
}

#[tokio::test]
async fn test_check_access_runs_gate_without_catalog() {
    let unpaid = AccessScenario::for_user(USER)
        .enrolled()
        .with_ticket(TicketStatus::Reserved, false, true)
        .with_hotel(1, "hotel 1")
        .build();
    let eligible = AccessScenario::for_user(USER)
        .eligible()
        .with_hotel(1, "hotel 1")
        .build();

    let denied = unpaid.controller.check_access(unpaid.user_id).await.unwrap();
    let granted = eligible.controller.check_access(eligible.user_id).await.unwrap();

    assert_eq!(denied, GateResult::Denied(DenialReason::PaymentRequired));
    assert_eq!(granted, GateResult::Found(()));
    assert!(unpaid.hotels.lookups().is_empty());
    assert!(eligible.hotels.lookups().is_empty());
}

#[tokio::test]
async fn test_reserved_then_paid_unlocks_hotels() {
    let scenario = AccessScenario::for_user(USER)
        .enrolled()
        .with_ticket(TicketStatus::Reserved, false, true)
        .with_hotel(1, "H1")
        .with_hotel(2, "H2")
        .build();

    let before = scenario.controller.get_hotels(UserId::new(USER)).await.unwrap();
    assert_eq!(before, GateResult::Denied(DenialReason::PaymentRequired));

    assert!(
        scenario
            .entitlements
            .set_ticket_status(TicketId::new(USER), TicketStatus::Paid)
    );

    let after = scenario.controller.get_hotels(UserId::new(USER)).await.unwrap();
    let names: Vec<String> = after
        .into_found()
        .expect("paid user should see hotels")
        .into_iter()
        .map(|h| h.name)
        .collect();
    assert_eq!(names, vec!["H1".to_string(), "H2".to_string()]);
}

// ============================================================================
// Short-circuiting
// ============================================================================

#[tokio::test]
async fn test_not_enrolled_stops_after_first_lookup() {
    let scenario = AccessScenario::for_user(USER).with_hotel(1, "hotel 1").build();

    scenario.controller.get_hotels(scenario.user_id).await.unwrap();

    assert_eq!(
        scenario.entitlements.lookups(),
        vec![Lookup::Enrollment(UserId::new(USER))]
    );
    assert!(scenario.hotels.lookups().is_empty());
}

#[tokio::test]
async fn test_unpaid_never_fetches_ticket_type_or_catalog() {
    let scenario = AccessScenario::for_user(USER)
        .enrolled()
        .with_ticket(TicketStatus::Reserved, false, true)
        .with_hotel(1, "hotel 1")
        .build();

    scenario
        .controller
        .get_hotel(scenario.user_id, HotelId::new(1))
        .await
        .unwrap();

    let lookups = scenario.entitlements.lookups();
    assert_eq!(lookups.len(), 2);
    assert!(!lookups.iter().any(|l| matches!(l, Lookup::TicketType(_))));
    assert!(scenario.hotels.lookups().is_empty());
}

#[tokio::test]
async fn test_eligible_issues_one_lookup_per_stage() {
    let scenario = AccessScenario::for_user(USER)
        .eligible()
        .with_hotel(1, "hotel 1")
        .build();

    scenario.controller.get_hotels(scenario.user_id).await.unwrap();

    assert_eq!(
        scenario.entitlements.lookups(),
        vec![
            Lookup::Enrollment(UserId::new(USER)),
            Lookup::Ticket(hotel_gate_core::EnrollmentId::new(USER)),
            Lookup::TicketType(TicketTypeId::new(USER)),
        ]
    );
    assert_eq!(scenario.hotels.lookups(), vec![Lookup::ListHotels]);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_store_failure_propagates_and_stops_cascade() {
    let scenario = AccessScenario::for_user(USER)
        .eligible()
        .with_hotel(1, "hotel 1")
        .build();
    scenario.entitlements.fail_on(LookupKind::Ticket);

    let err = scenario
        .controller
        .get_hotels(scenario.user_id)
        .await
        .unwrap_err();

    assert!(matches!(err, AccessError::Store(StoreError::Connection(_))));
    assert_eq!(scenario.entitlements.lookups().len(), 2);
    assert!(scenario.hotels.lookups().is_empty());
}

#[tokio::test]
async fn test_catalog_failure_propagates() {
    let scenario = AccessScenario::for_user(USER)
        .eligible()
        .with_hotel(1, "hotel 1")
        .build();
    scenario.hotels.fail_on(LookupKind::Hotel);

    let err = scenario
        .controller
        .get_hotel(scenario.user_id, HotelId::new(1))
        .await
        .unwrap_err();

    assert!(matches!(err, AccessError::Store(_)));
    // A single attempt, no retry
    assert_eq!(scenario.hotels.lookups(), vec![Lookup::Hotel(HotelId::new(1))]);
}

#[tokio::test]
async fn test_missing_ticket_type_is_an_error_not_a_denial() {
    let scenario = AccessScenario::for_user(USER)
        .eligible()
        .with_hotel(1, "hotel 1")
        .build();
    scenario.entitlements.clear_ticket_types();

    let err = scenario
        .controller
        .get_hotels(scenario.user_id)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AccessError::MissingTicketType {
            ticket_id: TicketId::new(USER),
            ticket_type_id: TicketTypeId::new(USER),
        }
    );
    assert!(scenario.hotels.lookups().is_empty());
}

// ============================================================================
// Idempotence
// ============================================================================

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let scenario = AccessScenario::for_user(USER)
        .eligible()
        .with_hotel(1, "hotel 1")
        .with_room(11, 1, "101", 2)
        .build();

    let first = scenario
        .controller
        .get_hotel(scenario.user_id, HotelId::new(1))
        .await
        .unwrap();
    let second = scenario
        .controller
        .get_hotel(scenario.user_id, HotelId::new(1))
        .await
        .unwrap();
    assert_eq!(first, second);

    let first = scenario.controller.get_hotels(scenario.user_id).await.unwrap();
    let second = scenario.controller.get_hotels(scenario.user_id).await.unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Properties
// ============================================================================

fn expected_denial(
    enrolled: bool,
    ticket: Option<(TicketStatus, bool, bool)>,
    hotel_count: usize,
) -> Option<DenialReason> {
    if !enrolled {
        return Some(DenialReason::NotFound);
    }
    let Some((status, is_remote, includes_hotel)) = ticket else {
        return Some(DenialReason::NotFound);
    };
    if !status.is_paid() || is_remote || !includes_hotel {
        return Some(DenialReason::PaymentRequired);
    }
    if hotel_count == 0 {
        return Some(DenialReason::NotFound);
    }
    None
}

fn any_status() -> impl Strategy<Value = TicketStatus> {
    prop_oneof![Just(TicketStatus::Reserved), Just(TicketStatus::Paid)]
}

proptest! {
    #[test]
    fn get_hotels_matches_gate_rules(
        enrolled: bool,
        ticket in proptest::option::of((any_status(), any::<bool>(), any::<bool>())),
        hotel_count in 0usize..4,
    ) {
        let mut builder = AccessScenario::for_user(USER);
        if enrolled {
            builder = builder.enrolled();
        }
        if let Some((status, is_remote, includes_hotel)) = ticket {
            builder = builder.with_ticket(status, is_remote, includes_hotel);
        }
        for id in 0..hotel_count {
            let id = i32::try_from(id).unwrap() + 1;
            builder = builder.with_hotel(id, &format!("hotel {id}"));
        }
        let scenario = builder.build();

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let result = runtime
            .block_on(scenario.controller.get_hotels(scenario.user_id))
            .unwrap();

        match expected_denial(enrolled, ticket, hotel_count) {
            Some(reason) => prop_assert_eq!(result.denial(), Some(reason)),
            None => prop_assert_eq!(result.into_found().map(|h| h.len()), Some(hotel_count)),
        }
    }
}
