//! Fluent setup for access controller tests.
//!
//! Seeds the in-memory stores for one user and hands back a wired
//! [`AccessController`] together with the stores, so tests can inspect lookups
//! or change data between calls.

#![allow(clippy::module_name_repetitions)] // AccessScenario is the natural name

use crate::fixtures;
use crate::mocks::{InMemoryEntitlementStore, InMemoryHotelStore};
use hotel_gate_core::types::{TicketStatus, UserId};
use hotel_gate_core::{AccessController, EntitlementResolver, HotelCatalog};
use std::sync::Arc;

/// Builder for a single-user access scenario.
///
/// Enrollment, ticket and ticket type all reuse the user's numeric id as their
/// key, which keeps assertions on recorded lookups readable.
///
/// # Example
///
/// ```
/// use hotel_gate_testing::AccessScenario;
///
/// let scenario = AccessScenario::for_user(7)
///     .eligible()
///     .with_hotel(1, "hotel 1")
///     .with_hotel(2, "hotel 2")
///     .build();
///
/// assert_eq!(scenario.hotels.len(), 2);
/// ```
#[derive(Debug)]
pub struct AccessScenario {
    user_id: i32,
    entitlements: InMemoryEntitlementStore,
    hotels: InMemoryHotelStore,
}

impl AccessScenario {
    /// Start a scenario for `user_id` with empty stores.
    #[must_use]
    pub fn for_user(user_id: i32) -> Self {
        Self {
            user_id,
            entitlements: InMemoryEntitlementStore::new(),
            hotels: InMemoryHotelStore::new(),
        }
    }

    /// Give the user an enrollment.
    #[must_use]
    pub fn enrolled(self) -> Self {
        self.entitlements
            .insert_enrollment(fixtures::enrollment(self.user_id, self.user_id));
        self
    }

    /// Give the user's enrollment a ticket with the given status and class flags.
    #[must_use]
    pub fn with_ticket(self, status: TicketStatus, is_remote: bool, includes_hotel: bool) -> Self {
        self.entitlements.insert_ticket_type(fixtures::ticket_type(
            self.user_id,
            is_remote,
            includes_hotel,
        ));
        self.entitlements.insert_ticket(fixtures::ticket(
            self.user_id,
            self.user_id,
            self.user_id,
            status,
        ));
        self
    }

    /// Enrolled with a paid, in-person ticket that includes lodging.
    #[must_use]
    pub fn eligible(self) -> Self {
        self.enrolled().with_ticket(TicketStatus::Paid, false, true)
    }

    /// Add a hotel to the catalog.
    #[must_use]
    pub fn with_hotel(self, id: i32, name: &str) -> Self {
        self.hotels.insert_hotel(fixtures::hotel(id, name));
        self
    }

    /// Add a room to the catalog.
    #[must_use]
    pub fn with_room(self, id: i32, hotel_id: i32, name: &str, capacity: i32) -> Self {
        self.hotels
            .insert_room(fixtures::room(id, hotel_id, name, capacity));
        self
    }

    /// Wire the controller over the seeded stores.
    #[must_use]
    pub fn build(self) -> BuiltScenario {
        let controller = AccessController::new(
            EntitlementResolver::new(Arc::new(self.entitlements.clone())),
            HotelCatalog::new(Arc::new(self.hotels.clone())),
        );

        BuiltScenario {
            user_id: UserId::new(self.user_id),
            controller,
            entitlements: self.entitlements,
            hotels: self.hotels,
        }
    }
}

/// A wired scenario. Stores share state with the controller.
#[derive(Clone)]
pub struct BuiltScenario {
    /// The scenario's user
    pub user_id: UserId,
    /// Controller over the in-memory stores
    pub controller: AccessController,
    /// Entitlement store handle
    pub entitlements: InMemoryEntitlementStore,
    /// Hotel store handle
    pub hotels: InMemoryHotelStore,
}
