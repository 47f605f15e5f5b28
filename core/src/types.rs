//! Domain types for hotel access gating.
//!
//! All records here are reference data owned by external stores. The gate only
//! ever reads them, so none of these types expose mutating behaviour beyond what
//! tests need to construct them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Declares an integer-keyed identifier newtype.
///
/// The external schema uses auto-increment `INTEGER` keys, so every identifier
/// wraps an `i32` and serializes as a bare number.
macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[doc = concat!("Create a `", stringify!($name), "` from its raw key")]
            #[must_use]
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            /// Get the raw key
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

integer_id!(
    /// Identifier of an authenticated user
    UserId
);
integer_id!(
    /// Identifier of an event enrollment
    EnrollmentId
);
integer_id!(
    /// Identifier of a purchased ticket
    TicketId
);
integer_id!(
    /// Identifier of a ticket class
    TicketTypeId
);
integer_id!(
    /// Identifier of a hotel
    HotelId
);
integer_id!(
    /// Identifier of a hotel room
    RoomId
);

// ============================================================================
// Entitlement records
// ============================================================================

/// A user's registration for the event. At most one per user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Enrollment key
    pub id: EnrollmentId,
    /// Owning user (unique)
    pub user_id: UserId,
    /// Attendee name
    pub name: String,
    /// Attendee tax document number
    pub cpf: String,
    /// Attendee date of birth
    pub birthday: DateTime<Utc>,
    /// Contact phone
    pub phone: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Payment status of a ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Held but not yet paid for
    Reserved,
    /// Payment confirmed
    Paid,
}

impl TicketStatus {
    /// Whether payment has been confirmed.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        matches!(self, Self::Paid)
    }

    /// Storage representation (`RESERVED` / `PAID`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reserved => "RESERVED",
            Self::Paid => "PAID",
        }
    }

    /// Parse the storage representation.
    ///
    /// Returns `None` for anything other than `RESERVED` or `PAID`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "RESERVED" => Some(Self::Reserved),
            "PAID" => Some(Self::Paid),
            _ => None,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A purchased ticket, tied to exactly one enrollment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Ticket key
    pub id: TicketId,
    /// Ticket class this ticket was bought as
    pub ticket_type_id: TicketTypeId,
    /// Owning enrollment
    pub enrollment_id: EnrollmentId,
    /// Payment status
    pub status: TicketStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A ticket class: whether it is remote-only and whether lodging is included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    /// Ticket type key
    pub id: TicketTypeId,
    /// Display name
    pub name: String,
    /// Price in the smallest currency unit
    pub price: i32,
    /// Online-only attendance
    pub is_remote: bool,
    /// Lodging bundled with the ticket
    pub includes_hotel: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl TicketType {
    /// In-person tickets that bundle lodging are the only class allowed to browse hotels.
    #[must_use]
    pub const fn grants_hotel_access(&self) -> bool {
        !self.is_remote && self.includes_hotel
    }
}

// ============================================================================
// Catalog records
// ============================================================================

/// A hotel listed for the event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    /// Hotel key
    pub id: HotelId,
    /// Display name
    pub name: String,
    /// Image URL
    pub image: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A room belonging to exactly one hotel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Room key
    pub id: RoomId,
    /// Display name (usually the room number)
    pub name: String,
    /// Number of guests the room sleeps
    pub capacity: i32,
    /// Owning hotel
    pub hotel_id: HotelId,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A hotel together with its rooms, ordered by room id.
///
/// Serializes as the hotel's own fields plus a `Rooms` array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelWithRooms {
    /// The hotel itself
    #[serde(flatten)]
    pub hotel: Hotel,
    /// Rooms owned by the hotel
    #[serde(rename = "Rooms")]
    pub rooms: Vec<Room>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn timestamp() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn ticket_type(is_remote: bool, includes_hotel: bool) -> TicketType {
        TicketType {
            id: TicketTypeId::new(1),
            name: "test".to_string(),
            price: 200,
            is_remote,
            includes_hotel,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    #[test]
    fn test_ticket_status_storage_representation() {
        assert_eq!(TicketStatus::parse("PAID"), Some(TicketStatus::Paid));
        assert_eq!(TicketStatus::parse("RESERVED"), Some(TicketStatus::Reserved));
        assert_eq!(TicketStatus::parse("paid"), None);
        assert_eq!(TicketStatus::Paid.as_str(), "PAID");
        assert!(TicketStatus::Paid.is_paid());
        assert!(!TicketStatus::Reserved.is_paid());
    }

    #[test]
    fn test_hotel_access_requires_in_person_with_hotel() {
        assert!(ticket_type(false, true).grants_hotel_access());
        assert!(!ticket_type(true, true).grants_hotel_access());
        assert!(!ticket_type(false, false).grants_hotel_access());
        assert!(!ticket_type(true, false).grants_hotel_access());
    }

    #[test]
    fn test_hotel_with_rooms_wire_shape() {
        let hotel = HotelWithRooms {
            hotel: Hotel {
                id: HotelId::new(3),
                name: "hotel 1".to_string(),
                image: "https://example.com/h1.jpg".to_string(),
                created_at: timestamp(),
                updated_at: timestamp(),
            },
            rooms: vec![Room {
                id: RoomId::new(10),
                name: "101".to_string(),
                capacity: 2,
                hotel_id: HotelId::new(3),
                created_at: timestamp(),
                updated_at: timestamp(),
            }],
        };

        let json = serde_json::to_value(&hotel).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "hotel 1");
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["Rooms"][0]["hotelId"], 3);
        assert_eq!(json["Rooms"][0]["capacity"], 2);
    }
}
