//! # Hotel Gate Testing
//!
//! Testing utilities for the hotel gate.
//!
//! This crate provides:
//! - In-memory implementations of the store traits, with lookup recording and
//!   failure injection
//! - Record fixtures with deterministic timestamps
//! - [`AccessScenario`], a fluent builder that wires an `AccessController`
//!
//! ## Example
//!
//! ```ignore
//! use hotel_gate_testing::AccessScenario;
//! use hotel_gate_core::{DenialReason, GateResult};
//!
//! #[tokio::test]
//! async fn test_unpaid_ticket() {
//!     let scenario = AccessScenario::for_user(7)
//!         .enrolled()
//!         .with_ticket(TicketStatus::Reserved, false, true)
//!         .build();
//!
//!     let result = scenario.controller.get_hotels(scenario.user_id).await.unwrap();
//!     assert_eq!(result, GateResult::Denied(DenialReason::PaymentRequired));
//! }
//! ```

pub mod fixtures;
pub mod mocks;
pub mod scenario;

// Re-export commonly used items
pub use fixtures::test_timestamp;
pub use mocks::{
    InMemoryEntitlementStore, InMemoryHotelStore, InMemorySessionStore, Lookup, LookupKind,
};
pub use scenario::{AccessScenario, BuiltScenario};

/// Install a test-friendly tracing subscriber.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotel_gate_core=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_timestamp() {
        assert_eq!(test_timestamp().to_rfc3339(), "2025-01-01T00:00:00+00:00");
        assert_eq!(test_timestamp(), test_timestamp());
    }
}
