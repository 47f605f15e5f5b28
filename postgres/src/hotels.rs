//! Hotel catalog lookups.

use crate::rows::{HotelRow, RoomRow};
use crate::{store_error, timed};
use hotel_gate_core::store::{HotelStore, StoreFuture};
use hotel_gate_core::types::{Hotel, HotelId, HotelWithRooms, Room};
use sqlx::PgPool;

/// Hotel catalog backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PostgresHotelStore {
    pool: PgPool,
}

impl PostgresHotelStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl HotelStore for PostgresHotelStore {
    fn list_hotels(&self) -> StoreFuture<'_, Vec<Hotel>> {
        Box::pin(async move {
            let rows: Vec<HotelRow> = timed(
                "list_hotels",
                sqlx::query_as(
                    r#"
                    SELECT "id", "name", "image", "createdAt", "updatedAt"
                    FROM "Hotel"
                    ORDER BY "id"
                    "#,
                )
                .fetch_all(&self.pool),
            )
            .await
            .map_err(|e| store_error("list_hotels", &e))?;

            tracing::trace!(count = rows.len(), "Hotels listed");
            Ok(rows.into_iter().map(Hotel::from).collect())
        })
    }

    fn find_hotel_by_id(&self, hotel_id: HotelId) -> StoreFuture<'_, Option<HotelWithRooms>> {
        Box::pin(async move {
            let hotel: Option<HotelRow> = timed(
                "find_hotel",
                sqlx::query_as(
                    r#"
                    SELECT "id", "name", "image", "createdAt", "updatedAt"
                    FROM "Hotel"
                    WHERE "id" = $1
                    "#,
                )
                .bind(hotel_id.get())
                .fetch_optional(&self.pool),
            )
            .await
            .map_err(|e| store_error("find_hotel", &e))?;

            let Some(hotel) = hotel else {
                return Ok(None);
            };

            let rooms: Vec<RoomRow> = timed(
                "find_rooms",
                sqlx::query_as(
                    r#"
                    SELECT "id", "name", "capacity", "hotelId", "createdAt", "updatedAt"
                    FROM "Room"
                    WHERE "hotelId" = $1
                    ORDER BY "id"
                    "#,
                )
                .bind(hotel_id.get())
                .fetch_all(&self.pool),
            )
            .await
            .map_err(|e| store_error("find_rooms", &e))?;

            tracing::trace!(hotel_id = %hotel_id, rooms = rooms.len(), "Hotel fetched");
            Ok(Some(HotelWithRooms {
                hotel: Hotel::from(hotel),
                rooms: rooms.into_iter().map(Room::from).collect(),
            }))
        })
    }
}
