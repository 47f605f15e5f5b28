//! Record builders with deterministic timestamps.

use chrono::{DateTime, Utc};
use hotel_gate_core::types::{
    Enrollment, EnrollmentId, Hotel, HotelId, Room, RoomId, Ticket, TicketId, TicketStatus,
    TicketType, TicketTypeId, UserId,
};

/// Fixed timestamp used by every fixture (2025-01-01 00:00:00 UTC).
#[must_use]
pub fn test_timestamp() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default()
}

/// Enrollment `id` owned by `user_id`.
#[must_use]
pub fn enrollment(id: i32, user_id: i32) -> Enrollment {
    Enrollment {
        id: EnrollmentId::new(id),
        user_id: UserId::new(user_id),
        name: "test".to_string(),
        cpf: "00000000000".to_string(),
        birthday: test_timestamp(),
        phone: "00000000000".to_string(),
        created_at: test_timestamp(),
        updated_at: test_timestamp(),
    }
}

/// Ticket `id` under `enrollment_id`, bought as `ticket_type_id`.
#[must_use]
pub fn ticket(id: i32, enrollment_id: i32, ticket_type_id: i32, status: TicketStatus) -> Ticket {
    Ticket {
        id: TicketId::new(id),
        ticket_type_id: TicketTypeId::new(ticket_type_id),
        enrollment_id: EnrollmentId::new(enrollment_id),
        status,
        created_at: test_timestamp(),
        updated_at: test_timestamp(),
    }
}

/// Ticket type `id` with the given flags.
#[must_use]
pub fn ticket_type(id: i32, is_remote: bool, includes_hotel: bool) -> TicketType {
    TicketType {
        id: TicketTypeId::new(id),
        name: "test".to_string(),
        price: 200,
        is_remote,
        includes_hotel,
        created_at: test_timestamp(),
        updated_at: test_timestamp(),
    }
}

/// Hotel `id` named `name`.
#[must_use]
pub fn hotel(id: i32, name: &str) -> Hotel {
    Hotel {
        id: HotelId::new(id),
        name: name.to_string(),
        image: format!("https://images.example.com/hotels/{id}.jpg"),
        created_at: test_timestamp(),
        updated_at: test_timestamp(),
    }
}

/// Room `id` in hotel `hotel_id`.
#[must_use]
pub fn room(id: i32, hotel_id: i32, name: &str, capacity: i32) -> Room {
    Room {
        id: RoomId::new(id),
        name: name.to_string(),
        capacity,
        hotel_id: HotelId::new(hotel_id),
        created_at: test_timestamp(),
        updated_at: test_timestamp(),
    }
}
