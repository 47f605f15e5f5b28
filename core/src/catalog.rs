//! Read-only hotel catalog.

use crate::store::{HotelStore, Result};
use crate::types::{Hotel, HotelId, HotelWithRooms};
use std::sync::Arc;

/// Thin read facade over a [`HotelStore`].
///
/// Applies no entitlement filtering; callers gate access before reaching it.
#[derive(Clone)]
pub struct HotelCatalog {
    store: Arc<dyn HotelStore>,
}

impl HotelCatalog {
    /// Create a catalog over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn HotelStore>) -> Self {
        Self { store }
    }

    /// All hotels in the store's natural order. May be empty.
    ///
    /// # Errors
    ///
    /// Returns error if the store lookup fails.
    pub async fn list_hotels(&self) -> Result<Vec<Hotel>> {
        self.store.list_hotels().await
    }

    /// A single hotel with its rooms, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns error if the store lookup fails.
    pub async fn get_hotel(&self, hotel_id: HotelId) -> Result<Option<HotelWithRooms>> {
        self.store.find_hotel_by_id(hotel_id).await
    }
}
