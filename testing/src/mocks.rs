//! In-memory store implementations for testing.
//!
//! Both stores record every lookup they serve, so tests can assert not only the
//! outcome of an evaluation but which lookups it issued. Failures can be injected
//! per lookup kind.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on poisoned locks

use hotel_gate_core::store::{
    EntitlementStore, HotelStore, SessionStore, StoreError, StoreFuture,
};
use hotel_gate_core::types::{
    Enrollment, EnrollmentId, Hotel, HotelId, HotelWithRooms, Room, Ticket, TicketId,
    TicketStatus, TicketType, TicketTypeId, UserId,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// A lookup served by one of the in-memory stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lookup {
    /// `find_enrollment_by_user_id`
    Enrollment(UserId),
    /// `find_ticket_by_enrollment_id`
    Ticket(EnrollmentId),
    /// `find_ticket_type_by_id`
    TicketType(TicketTypeId),
    /// `list_hotels`
    ListHotels,
    /// `find_hotel_by_id`
    Hotel(HotelId),
    /// `find_user_by_token`
    Session,
}

/// Which lookup kind should fail when failure injection is enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// Enrollment lookups
    Enrollment,
    /// Ticket lookups
    Ticket,
    /// Ticket type lookups
    TicketType,
    /// Hotel list lookups
    ListHotels,
    /// Single hotel lookups
    Hotel,
    /// Session token lookups
    Session,
}

impl Lookup {
    /// The kind of this lookup.
    #[must_use]
    pub const fn kind(&self) -> LookupKind {
        match self {
            Self::Enrollment(_) => LookupKind::Enrollment,
            Self::Ticket(_) => LookupKind::Ticket,
            Self::TicketType(_) => LookupKind::TicketType,
            Self::ListHotels => LookupKind::ListHotels,
            Self::Hotel(_) => LookupKind::Hotel,
            Self::Session => LookupKind::Session,
        }
    }
}

/// Shared lookup journal and failure switches.
#[derive(Debug, Default)]
struct Journal {
    lookups: RwLock<Vec<Lookup>>,
    failing: RwLock<HashSet<LookupKind>>,
}

impl Journal {
    fn record(&self, lookup: Lookup) -> Result<(), StoreError> {
        self.lookups.write().unwrap().push(lookup);
        if self.failing.read().unwrap().contains(&lookup.kind()) {
            return Err(StoreError::Connection(format!(
                "injected failure for {lookup:?}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Entitlement store
// ============================================================================

#[derive(Debug, Default)]
struct EntitlementData {
    enrollments: HashMap<UserId, Enrollment>,
    tickets: HashMap<EnrollmentId, Ticket>,
    ticket_types: HashMap<TicketTypeId, TicketType>,
}

/// In-memory [`EntitlementStore`] keyed the way the real tables are indexed.
///
/// # Example
///
/// ```
/// use hotel_gate_testing::{fixtures, InMemoryEntitlementStore};
/// use hotel_gate_core::store::EntitlementStore;
/// use hotel_gate_core::types::UserId;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryEntitlementStore::new();
/// store.insert_enrollment(fixtures::enrollment(1, 7));
///
/// let enrollment = store.find_enrollment_by_user_id(UserId::new(7)).await?;
/// assert!(enrollment.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryEntitlementStore {
    data: Arc<RwLock<EntitlementData>>,
    journal: Arc<Journal>,
}

impl InMemoryEntitlementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the enrollment for its user.
    pub fn insert_enrollment(&self, enrollment: Enrollment) {
        self.data
            .write()
            .unwrap()
            .enrollments
            .insert(enrollment.user_id, enrollment);
    }

    /// Insert or replace the ticket for its enrollment.
    pub fn insert_ticket(&self, ticket: Ticket) {
        self.data
            .write()
            .unwrap()
            .tickets
            .insert(ticket.enrollment_id, ticket);
    }

    /// Insert or replace a ticket type.
    pub fn insert_ticket_type(&self, ticket_type: TicketType) {
        self.data
            .write()
            .unwrap()
            .ticket_types
            .insert(ticket_type.id, ticket_type);
    }

    /// Change the status of an existing ticket. Returns `false` if not found.
    pub fn set_ticket_status(&self, ticket_id: TicketId, status: TicketStatus) -> bool {
        let mut data = self.data.write().unwrap();
        data.tickets
            .values_mut()
            .find(|ticket| ticket.id == ticket_id)
            .map(|ticket| ticket.status = status)
            .is_some()
    }

    /// Remove every ticket type, leaving tickets with dangling references.
    pub fn clear_ticket_types(&self) {
        self.data.write().unwrap().ticket_types.clear();
    }

    /// Make every lookup of `kind` fail with [`StoreError::Connection`].
    pub fn fail_on(&self, kind: LookupKind) {
        self.journal.failing.write().unwrap().insert(kind);
    }

    /// Every lookup served so far, in order.
    #[must_use]
    pub fn lookups(&self) -> Vec<Lookup> {
        self.journal.lookups.read().unwrap().clone()
    }

    /// Forget recorded lookups.
    pub fn clear_lookups(&self) {
        self.journal.lookups.write().unwrap().clear();
    }
}

impl EntitlementStore for InMemoryEntitlementStore {
    fn find_enrollment_by_user_id(&self, user_id: UserId) -> StoreFuture<'_, Option<Enrollment>> {
        Box::pin(async move {
            self.journal.record(Lookup::Enrollment(user_id))?;
            Ok(self.data.read().unwrap().enrollments.get(&user_id).cloned())
        })
    }

    fn find_ticket_by_enrollment_id(
        &self,
        enrollment_id: EnrollmentId,
    ) -> StoreFuture<'_, Option<Ticket>> {
        Box::pin(async move {
            self.journal.record(Lookup::Ticket(enrollment_id))?;
            Ok(self.data.read().unwrap().tickets.get(&enrollment_id).cloned())
        })
    }

    fn find_ticket_type_by_id(&self, id: TicketTypeId) -> StoreFuture<'_, Option<TicketType>> {
        Box::pin(async move {
            self.journal.record(Lookup::TicketType(id))?;
            Ok(self.data.read().unwrap().ticket_types.get(&id).cloned())
        })
    }
}

// ============================================================================
// Hotel store
// ============================================================================

#[derive(Debug, Default)]
struct HotelData {
    hotels: Vec<Hotel>,
    rooms: Vec<Room>,
}

/// In-memory [`HotelStore`]. Hotels keep insertion order; rooms are returned
/// sorted by id.
#[derive(Clone, Debug, Default)]
pub struct InMemoryHotelStore {
    data: Arc<RwLock<HotelData>>,
    journal: Arc<Journal>,
}

impl InMemoryHotelStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hotel.
    pub fn insert_hotel(&self, hotel: Hotel) {
        self.data.write().unwrap().hotels.push(hotel);
    }

    /// Append a room. The owning hotel does not need to exist yet.
    pub fn insert_room(&self, room: Room) {
        self.data.write().unwrap().rooms.push(room);
    }

    /// Remove all hotels and rooms.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        data.hotels.clear();
        data.rooms.clear();
    }

    /// Number of hotels stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().unwrap().hotels.len()
    }

    /// Whether no hotel is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.read().unwrap().hotels.is_empty()
    }

    /// Make every lookup of `kind` fail with [`StoreError::Connection`].
    pub fn fail_on(&self, kind: LookupKind) {
        self.journal.failing.write().unwrap().insert(kind);
    }

    /// Every lookup served so far, in order.
    #[must_use]
    pub fn lookups(&self) -> Vec<Lookup> {
        self.journal.lookups.read().unwrap().clone()
    }
}

impl HotelStore for InMemoryHotelStore {
    fn list_hotels(&self) -> StoreFuture<'_, Vec<Hotel>> {
        Box::pin(async move {
            self.journal.record(Lookup::ListHotels)?;
            Ok(self.data.read().unwrap().hotels.clone())
        })
    }

    fn find_hotel_by_id(&self, hotel_id: HotelId) -> StoreFuture<'_, Option<HotelWithRooms>> {
        Box::pin(async move {
            self.journal.record(Lookup::Hotel(hotel_id))?;
            let data = self.data.read().unwrap();
            let Some(hotel) = data.hotels.iter().find(|h| h.id == hotel_id).cloned() else {
                return Ok(None);
            };
            let mut rooms: Vec<Room> = data
                .rooms
                .iter()
                .filter(|room| room.hotel_id == hotel_id)
                .cloned()
                .collect();
            rooms.sort_by_key(|room| room.id);
            Ok(Some(HotelWithRooms { hotel, rooms }))
        })
    }
}

// ============================================================================
// Session store
// ============================================================================

/// In-memory [`SessionStore`] mapping bearer tokens to users.
#[derive(Clone, Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, UserId>>>,
    journal: Arc<Journal>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `token` as a session of `user_id`.
    pub fn insert_session(&self, token: impl Into<String>, user_id: UserId) {
        self.sessions.write().unwrap().insert(token.into(), user_id);
    }

    /// Make every token lookup fail with [`StoreError::Connection`].
    pub fn fail_on_lookup(&self) {
        self.journal.failing.write().unwrap().insert(LookupKind::Session);
    }

    /// Every lookup served so far, in order.
    #[must_use]
    pub fn lookups(&self) -> Vec<Lookup> {
        self.journal.lookups.read().unwrap().clone()
    }
}

impl SessionStore for InMemorySessionStore {
    fn find_user_by_token<'a>(&'a self, token: &'a str) -> StoreFuture<'a, Option<UserId>> {
        Box::pin(async move {
            self.journal.record(Lookup::Session)?;
            Ok(self.sessions.read().unwrap().get(token).copied())
        })
    }
}
