//! Read-only store contracts consumed by the gate, the catalog, and the HTTP
//! boundary's session lookup.
//!
//! Stores are injected as `Arc<dyn …>`, so every method returns a boxed future
//! instead of using `async fn` to stay dyn-compatible.

use crate::types::{
    Enrollment, EnrollmentId, Hotel, HotelId, HotelWithRooms, Ticket, TicketType, TicketTypeId,
    UserId,
};
use std::future::Future;
use std::pin::Pin;

/// Error type for store lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached
    #[error("Connection error: {0}")]
    Connection(String),

    /// The lookup itself failed
    #[error("Query error: {0}")]
    Query(String),

    /// A row could not be decoded into a domain record
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Result type for store lookups.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Boxed future returned by store lookups.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Lookups needed to decide whether a user may browse hotels.
pub trait EntitlementStore: Send + Sync {
    /// Find the enrollment owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the backend lookup fails.
    fn find_enrollment_by_user_id(&self, user_id: UserId) -> StoreFuture<'_, Option<Enrollment>>;

    /// Find the ticket bought under `enrollment_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the backend lookup fails.
    fn find_ticket_by_enrollment_id(
        &self,
        enrollment_id: EnrollmentId,
    ) -> StoreFuture<'_, Option<Ticket>>;

    /// Find a ticket type by id.
    ///
    /// # Errors
    ///
    /// Returns error if the backend lookup fails.
    fn find_ticket_type_by_id(&self, id: TicketTypeId) -> StoreFuture<'_, Option<TicketType>>;
}

/// Read access to the hotel catalog.
pub trait HotelStore: Send + Sync {
    /// All hotels, in the backend's natural order.
    ///
    /// # Errors
    ///
    /// Returns error if the backend lookup fails.
    fn list_hotels(&self) -> StoreFuture<'_, Vec<Hotel>>;

    /// A single hotel with its rooms ordered by room id.
    ///
    /// # Errors
    ///
    /// Returns error if the backend lookup fails.
    fn find_hotel_by_id(&self, hotel_id: HotelId) -> StoreFuture<'_, Option<HotelWithRooms>>;
}

/// Resolves bearer tokens to users. Token issuance happens elsewhere.
pub trait SessionStore: Send + Sync {
    /// The user owning the session identified by `token`, if any.
    ///
    /// # Errors
    ///
    /// Returns error if the backend lookup fails.
    fn find_user_by_token<'a>(&'a self, token: &'a str) -> StoreFuture<'a, Option<UserId>>;
}
