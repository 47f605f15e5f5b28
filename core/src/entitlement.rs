//! Entitlement cascade: may this user browse hotels?
//!
//! Evaluation walks a fixed sequence of checks and stops at the first one that
//! fails:
//!
//! ```text
//! Start → EnrollmentCheck → TicketCheck → PaymentCheck → EligibilityCheck
//!              │                 │              │                │
//!         NotEnrolled        NoTicket        Unpaid    NotEligible / Eligible
//! ```
//!
//! Each state owns the record fetched by the previous one, so a later check can
//! never run without the lookup that justifies it. No state is revisited.

use crate::error::{AccessError, Result};
use crate::store::EntitlementStore;
use crate::types::{Enrollment, Ticket, TicketType, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Outcome of the entitlement cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateVerdict {
    /// No enrollment exists for the user
    NotEnrolled,
    /// The enrollment has no ticket
    NoTicket,
    /// The ticket has not been paid for
    Unpaid,
    /// The ticket class is remote-only or excludes lodging
    NotEligible,
    /// All checks passed
    Eligible,
}

impl GateVerdict {
    /// Whether hotel data may be returned.
    #[must_use]
    pub const fn is_eligible(self) -> bool {
        matches!(self, Self::Eligible)
    }

    /// The stage at which this verdict was reached.
    #[must_use]
    pub const fn stage(self) -> GateStage {
        match self {
            Self::NotEnrolled => GateStage::EnrollmentCheck,
            Self::NoTicket => GateStage::TicketCheck,
            Self::Unpaid => GateStage::PaymentCheck,
            Self::NotEligible | Self::Eligible => GateStage::EligibilityCheck,
        }
    }

    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotEnrolled => "not_enrolled",
            Self::NoTicket => "no_ticket",
            Self::Unpaid => "unpaid",
            Self::NotEligible => "not_eligible",
            Self::Eligible => "eligible",
        }
    }
}

impl fmt::Display for GateVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// States of an access evaluation, including the catalog fetch that follows an
/// eligible verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateStage {
    /// Nothing looked up yet
    Start,
    /// Looking up the enrollment
    EnrollmentCheck,
    /// Looking up the ticket
    TicketCheck,
    /// Inspecting the ticket status
    PaymentCheck,
    /// Looking up and inspecting the ticket type
    EligibilityCheck,
    /// Reading the hotel catalog
    CatalogFetch,
    /// Terminal: access refused or nothing to show
    Denied,
    /// Terminal: data returned
    Found,
}

impl GateStage {
    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Denied | Self::Found)
    }
}

/// Denial produced by the payment check, if any.
#[must_use]
pub const fn payment_check(ticket: &Ticket) -> Option<GateVerdict> {
    if ticket.status.is_paid() {
        None
    } else {
        Some(GateVerdict::Unpaid)
    }
}

/// Denial produced by the eligibility check, if any.
#[must_use]
pub const fn eligibility_check(ticket_type: &TicketType) -> Option<GateVerdict> {
    if ticket_type.grants_hotel_access() {
        None
    } else {
        Some(GateVerdict::NotEligible)
    }
}

/// In-flight cascade state. Each variant carries what the next check consumes.
enum Cascade {
    Start,
    EnrollmentCheck,
    TicketCheck(Enrollment),
    PaymentCheck(Ticket),
    EligibilityCheck(Ticket),
    Decided(GateVerdict),
}

impl Cascade {
    const fn stage(&self) -> GateStage {
        match self {
            Self::Start => GateStage::Start,
            Self::EnrollmentCheck => GateStage::EnrollmentCheck,
            Self::TicketCheck(_) => GateStage::TicketCheck,
            Self::PaymentCheck(_) => GateStage::PaymentCheck,
            Self::EligibilityCheck(_) => GateStage::EligibilityCheck,
            Self::Decided(verdict) => verdict.stage(),
        }
    }
}

/// Resolves a user's hotel entitlement from enrollment, ticket and ticket type.
///
/// Holds nothing but a handle to the store; every call to [`evaluate`](Self::evaluate)
/// is independent.
#[derive(Clone)]
pub struct EntitlementResolver {
    store: Arc<dyn EntitlementStore>,
}

impl EntitlementResolver {
    /// Create a resolver over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn EntitlementStore>) -> Self {
        Self { store }
    }

    /// Run the cascade for `user_id`.
    ///
    /// Issues at most three lookups, one per stage, and none after the first
    /// failing check.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Store`] if any lookup fails, or
    /// [`AccessError::MissingTicketType`] if the paid ticket references a ticket
    /// type the store cannot find.
    pub async fn evaluate(&self, user_id: UserId) -> Result<GateVerdict> {
        let mut state = Cascade::Start;

        loop {
            tracing::trace!(%user_id, stage = ?state.stage(), "Entitlement cascade step");

            state = match state {
                Cascade::Start => Cascade::EnrollmentCheck,
                Cascade::EnrollmentCheck => {
                    match self.store.find_enrollment_by_user_id(user_id).await? {
                        Some(enrollment) => Cascade::TicketCheck(enrollment),
                        None => Cascade::Decided(GateVerdict::NotEnrolled),
                    }
                }
                Cascade::TicketCheck(enrollment) => {
                    match self.store.find_ticket_by_enrollment_id(enrollment.id).await? {
                        Some(ticket) => Cascade::PaymentCheck(ticket),
                        None => Cascade::Decided(GateVerdict::NoTicket),
                    }
                }
                Cascade::PaymentCheck(ticket) => match payment_check(&ticket) {
                    Some(denial) => Cascade::Decided(denial),
                    None => Cascade::EligibilityCheck(ticket),
                },
                Cascade::EligibilityCheck(ticket) => {
                    let ticket_type = self
                        .store
                        .find_ticket_type_by_id(ticket.ticket_type_id)
                        .await?
                        .ok_or(AccessError::MissingTicketType {
                            ticket_id: ticket.id,
                            ticket_type_id: ticket.ticket_type_id,
                        })?;
                    Cascade::Decided(
                        eligibility_check(&ticket_type).unwrap_or(GateVerdict::Eligible),
                    )
                }
                Cascade::Decided(verdict) => {
                    tracing::debug!(
                        %user_id,
                        %verdict,
                        stage = ?verdict.stage(),
                        "Entitlement resolved"
                    );
                    return Ok(verdict);
                }
            };
        }
    }
}
