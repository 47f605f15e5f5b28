//! Failures that end an access evaluation without a verdict.
//!
//! Denials are not errors; they are returned as [`GateResult::Denied`](crate::access::GateResult).
//! This type only covers the cases where the stores could not answer.

use crate::store::StoreError;
use crate::types::{TicketId, TicketTypeId};

/// Error type for access evaluations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// A store lookup failed. Propagated as-is, never retried.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A ticket points at a ticket type the store does not know about.
    #[error("Ticket {ticket_id} references missing ticket type {ticket_type_id}")]
    MissingTicketType {
        /// The ticket holding the dangling reference
        ticket_id: TicketId,
        /// The ticket type that could not be found
        ticket_type_id: TicketTypeId,
    },
}

/// Result type for access evaluations.
pub type Result<T> = std::result::Result<T, AccessError>;
