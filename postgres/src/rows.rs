//! Row shapes for the event tables and their conversion into domain records.
//!
//! The tables store `TIMESTAMP(3)` without a zone; values are UTC by convention.

use chrono::NaiveDateTime;
use hotel_gate_core::store::StoreError;
use hotel_gate_core::types::{
    Enrollment, EnrollmentId, Hotel, HotelId, Room, RoomId, Ticket, TicketId, TicketStatus,
    TicketType, TicketTypeId, UserId,
};

#[derive(Debug, sqlx::FromRow)]
#[sqlx(rename_all = "camelCase")]
pub(crate) struct EnrollmentRow {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub cpf: String,
    pub birthday: NaiveDateTime,
    pub phone: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Self {
            id: EnrollmentId::new(row.id),
            user_id: UserId::new(row.user_id),
            name: row.name,
            cpf: row.cpf,
            birthday: row.birthday.and_utc(),
            phone: row.phone,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        }
    }
}

/// `status` is selected as `::text` since it is a Postgres enum.
#[derive(Debug, sqlx::FromRow)]
#[sqlx(rename_all = "camelCase")]
pub(crate) struct TicketRow {
    pub id: i32,
    pub ticket_type_id: i32,
    pub enrollment_id: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = StoreError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        let status = TicketStatus::parse(&row.status).ok_or_else(|| {
            StoreError::Decode(format!(
                "Ticket {} has unknown status {:?}",
                row.id, row.status
            ))
        })?;

        Ok(Self {
            id: TicketId::new(row.id),
            ticket_type_id: TicketTypeId::new(row.ticket_type_id),
            enrollment_id: EnrollmentId::new(row.enrollment_id),
            status,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
#[sqlx(rename_all = "camelCase")]
pub(crate) struct TicketTypeRow {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub is_remote: bool,
    pub includes_hotel: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<TicketTypeRow> for TicketType {
    fn from(row: TicketTypeRow) -> Self {
        Self {
            id: TicketTypeId::new(row.id),
            name: row.name,
            price: row.price,
            is_remote: row.is_remote,
            includes_hotel: row.includes_hotel,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
#[sqlx(rename_all = "camelCase")]
pub(crate) struct HotelRow {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<HotelRow> for Hotel {
    fn from(row: HotelRow) -> Self {
        Self {
            id: HotelId::new(row.id),
            name: row.name,
            image: row.image,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
#[sqlx(rename_all = "camelCase")]
pub(crate) struct RoomRow {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub hotel_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Self {
            id: RoomId::new(row.id),
            name: row.name,
            capacity: row.capacity,
            hotel_id: HotelId::new(row.hotel_id),
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn naive() -> NaiveDateTime {
        DateTime::from_timestamp(1_735_689_600, 0)
            .unwrap_or_default()
            .naive_utc()
    }

    fn ticket_row(status: &str) -> TicketRow {
        TicketRow {
            id: 4,
            ticket_type_id: 2,
            enrollment_id: 1,
            status: status.to_string(),
            created_at: naive(),
            updated_at: naive(),
        }
    }

    #[test]
    fn test_ticket_row_parses_status() {
        let ticket = Ticket::try_from(ticket_row("PAID"));
        assert!(matches!(ticket, Ok(Ticket { status: TicketStatus::Paid, .. })));
    }

    #[test]
    fn test_ticket_row_rejects_unknown_status() {
        let err = Ticket::try_from(ticket_row("REFUNDED"));
        assert_eq!(
            err,
            Err(StoreError::Decode(
                "Ticket 4 has unknown status \"REFUNDED\"".to_string()
            ))
        );
    }

    #[test]
    fn test_timestamps_are_read_as_utc() {
        let hotel = Hotel::from(HotelRow {
            id: 1,
            name: "hotel 1".to_string(),
            image: "https://example.com/1.jpg".to_string(),
            created_at: naive(),
            updated_at: naive(),
        });
        assert_eq!(hotel.created_at.to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }
}
