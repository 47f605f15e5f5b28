//! Access controller: gate first, then read the catalog.
//!
//! Outward results deliberately merge denial causes. A caller sees
//! [`DenialReason::NotFound`] whether the user never enrolled, has no ticket, or
//! there is simply no hotel to show, and [`DenialReason::PaymentRequired`]
//! whether the ticket is unpaid or of the wrong class. The precise
//! [`GateVerdict`] never leaves this module.

use crate::catalog::HotelCatalog;
use crate::entitlement::{EntitlementResolver, GateStage, GateVerdict};
use crate::error::Result;
use crate::types::{Hotel, HotelId, HotelWithRooms, UserId};
use serde::{Deserialize, Serialize};

/// Why an access request was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// No enrollment, no ticket, or no matching hotel data
    NotFound,
    /// Unpaid ticket or a ticket class without hotel access
    PaymentRequired,
}

impl DenialReason {
    /// Collapse a verdict into its outward denial, or `None` if eligible.
    #[must_use]
    pub const fn from_verdict(verdict: GateVerdict) -> Option<Self> {
        match verdict {
            GateVerdict::NotEnrolled | GateVerdict::NoTicket => Some(Self::NotFound),
            GateVerdict::Unpaid | GateVerdict::NotEligible => Some(Self::PaymentRequired),
            GateVerdict::Eligible => None,
        }
    }

    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::PaymentRequired => "payment_required",
        }
    }
}

/// Tagged outcome of an access request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateResult<T> {
    /// Access refused, or nothing to return
    Denied(DenialReason),
    /// Access granted and data found
    Found(T),
}

impl<T> GateResult<T> {
    /// Whether data was returned.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The denial reason, if refused.
    #[must_use]
    pub const fn denial(&self) -> Option<DenialReason> {
        match self {
            Self::Denied(reason) => Some(*reason),
            Self::Found(_) => None,
        }
    }

    /// The payload, if found.
    #[must_use]
    pub fn into_found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Denied(_) => None,
        }
    }

    /// Terminal stage this result corresponds to.
    #[must_use]
    pub const fn stage(&self) -> GateStage {
        match self {
            Self::Denied(_) => GateStage::Denied,
            Self::Found(_) => GateStage::Found,
        }
    }

    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::Denied(reason) => reason.as_str(),
            Self::Found(_) => "found",
        }
    }
}

/// Runs the entitlement gate and, only on success, queries the catalog.
#[derive(Clone)]
pub struct AccessController {
    resolver: EntitlementResolver,
    catalog: HotelCatalog,
}

impl AccessController {
    /// Compose a controller from a resolver and a catalog.
    #[must_use]
    pub const fn new(resolver: EntitlementResolver, catalog: HotelCatalog) -> Self {
        Self { resolver, catalog }
    }

    /// List every hotel, if `user_id` is entitled to see them.
    ///
    /// An empty catalog is reported as [`DenialReason::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns error if any store lookup fails or the ticket's type is missing.
    pub async fn get_hotels(&self, user_id: UserId) -> Result<GateResult<Vec<Hotel>>> {
        if let Some(denial) = self.gate(user_id).await? {
            return Ok(GateResult::Denied(denial));
        }

        let hotels = self.catalog.list_hotels().await?;
        let result = if hotels.is_empty() {
            GateResult::Denied(DenialReason::NotFound)
        } else {
            GateResult::Found(hotels)
        };

        tracing::debug!(
            %user_id,
            stage = ?result.stage(),
            outcome = result.outcome(),
            "Hotel list request resolved"
        );
        Ok(result)
    }

    /// Fetch one hotel with its rooms, if `user_id` is entitled to see it.
    ///
    /// # Errors
    ///
    /// Returns error if any store lookup fails or the ticket's type is missing.
    pub async fn get_hotel(
        &self,
        user_id: UserId,
        hotel_id: HotelId,
    ) -> Result<GateResult<HotelWithRooms>> {
        if let Some(denial) = self.gate(user_id).await? {
            return Ok(GateResult::Denied(denial));
        }

        let result = match self.catalog.get_hotel(hotel_id).await? {
            Some(hotel) => GateResult::Found(hotel),
            None => GateResult::Denied(DenialReason::NotFound),
        };

        tracing::debug!(
            %user_id,
            %hotel_id,
            stage = ?result.stage(),
            outcome = result.outcome(),
            "Hotel request resolved"
        );
        Ok(result)
    }

    /// Run the gate alone, without reading the catalog.
    ///
    /// `Found(())` means the user may see hotel data. Used when a request
    /// can only be answered once entitlement is settled, such as a hotel key
    /// that names no hotel.
    ///
    /// # Errors
    ///
    /// Returns error if any store lookup fails or the ticket's type is missing.
    pub async fn check_access(&self, user_id: UserId) -> Result<GateResult<()>> {
        Ok(match self.gate(user_id).await? {
            Some(denial) => GateResult::Denied(denial),
            None => GateResult::Found(()),
        })
    }

    /// Run the cascade; `Some(reason)` means stop without touching the catalog.
    async fn gate(&self, user_id: UserId) -> Result<Option<DenialReason>> {
        let verdict = self.resolver.evaluate(user_id).await?;
        let denial = DenialReason::from_verdict(verdict);

        if let Some(reason) = denial {
            tracing::debug!(
                %user_id,
                stage = ?GateStage::Denied,
                outcome = reason.as_str(),
                "Access denied by entitlement gate"
            );
        } else {
            tracing::trace!(%user_id, stage = ?GateStage::CatalogFetch, "Entitlement granted");
        }

        Ok(denial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_verdict() -> impl Strategy<Value = GateVerdict> {
        prop_oneof![
            Just(GateVerdict::NotEnrolled),
            Just(GateVerdict::NoTicket),
            Just(GateVerdict::Unpaid),
            Just(GateVerdict::NotEligible),
            Just(GateVerdict::Eligible),
        ]
    }

    #[test]
    fn test_verdict_to_denial_mapping() {
        assert_eq!(
            DenialReason::from_verdict(GateVerdict::NotEnrolled),
            Some(DenialReason::NotFound)
        );
        assert_eq!(
            DenialReason::from_verdict(GateVerdict::NoTicket),
            Some(DenialReason::NotFound)
        );
        assert_eq!(
            DenialReason::from_verdict(GateVerdict::Unpaid),
            Some(DenialReason::PaymentRequired)
        );
        assert_eq!(
            DenialReason::from_verdict(GateVerdict::NotEligible),
            Some(DenialReason::PaymentRequired)
        );
        assert_eq!(DenialReason::from_verdict(GateVerdict::Eligible), None);
    }

    #[test]
    fn test_gate_result_accessors() {
        let found: GateResult<u8> = GateResult::Found(3);
        assert!(found.is_found());
        assert_eq!(found.denial(), None);
        assert_eq!(found.stage(), GateStage::Found);
        assert_eq!(found.outcome(), "found");
        assert_eq!(found.into_found(), Some(3));

        let denied: GateResult<u8> = GateResult::Denied(DenialReason::PaymentRequired);
        assert!(!denied.is_found());
        assert_eq!(denied.denial(), Some(DenialReason::PaymentRequired));
        assert_eq!(denied.stage(), GateStage::Denied);
        assert_eq!(denied.outcome(), "payment_required");
        assert_eq!(denied.into_found(), None);
    }

    proptest! {
        #[test]
        fn only_eligible_passes_the_gate(verdict in any_verdict()) {
            prop_assert_eq!(DenialReason::from_verdict(verdict).is_none(), verdict.is_eligible());
        }
    }
}
