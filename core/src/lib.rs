//! # Hotel Gate Core
//!
//! Entitlement gate and read-only hotel catalog for event attendees.
//!
//! A user may browse the event's hotels only if they are enrolled, hold a
//! ticket, have paid for it, and bought an in-person ticket that includes
//! lodging. Everything here is read-only: stores are injected as traits and no
//! record is ever created, cached, or mutated.
//!
//! ## Components
//!
//! - [`EntitlementResolver`]: runs the enrollment → ticket → payment → eligibility cascade
//! - [`HotelCatalog`]: lists hotels or fetches one with its rooms
//! - [`AccessController`]: composes both into a single [`GateResult`]
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────────────┐   Eligible   ┌──────────────┐
//! │ EntitlementResolver │ ───────────▶ │ HotelCatalog │ ──▶ Found / Denied(NotFound)
//! └─────────────────────┘              └──────────────┘
//!          │ NotEnrolled, NoTicket      → Denied(NotFound)
//!          │ Unpaid, NotEligible        → Denied(PaymentRequired)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use hotel_gate_core::*;
//!
//! let controller = AccessController::new(
//!     EntitlementResolver::new(entitlement_store),
//!     HotelCatalog::new(hotel_store),
//! );
//!
//! match controller.get_hotels(UserId::new(7)).await? {
//!     GateResult::Found(hotels) => render(hotels),
//!     GateResult::Denied(DenialReason::NotFound) => not_found(),
//!     GateResult::Denied(DenialReason::PaymentRequired) => payment_required(),
//! }
//! ```

pub mod access;
pub mod catalog;
pub mod entitlement;
pub mod error;
pub mod store;
pub mod types;

pub use access::{AccessController, DenialReason, GateResult};
pub use catalog::HotelCatalog;
pub use entitlement::{EntitlementResolver, GateStage, GateVerdict};
pub use error::AccessError;
pub use store::{EntitlementStore, HotelStore, SessionStore, StoreError, StoreFuture};
pub use types::{
    Enrollment, EnrollmentId, Hotel, HotelId, HotelWithRooms, Room, RoomId, Ticket, TicketId,
    TicketStatus, TicketType, TicketTypeId, UserId,
};
