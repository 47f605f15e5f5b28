//! `PostgreSQL` read stores for the hotel gate.
//!
//! Implements the store traits from `hotel-gate-core` over the event
//! platform's tables (`"Enrollment"`, `"Ticket"`, `"TicketType"`, `"Hotel"`,
//! `"Room"`, `"Session"`). All access is read-only.
//!
//! # Example
//!
//! ```ignore
//! use hotel_gate_postgres::{PostgresEntitlementStore, PostgresHotelStore};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = hotel_gate_postgres::connect("postgres://localhost/events").await?;
//!     let entitlements = PostgresEntitlementStore::new(pool.clone());
//!     let hotels = PostgresHotelStore::new(pool);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod entitlement;
mod hotels;
mod rows;
mod sessions;

pub use entitlement::PostgresEntitlementStore;
pub use hotels::PostgresHotelStore;
pub use sessions::PostgresSessionStore;

use hotel_gate_core::store::StoreError;
use std::future::Future;
use std::time::Instant;

/// Re-exported so callers can build pools without naming `sqlx` directly.
pub use sqlx::postgres::{PgPool, PgPoolOptions};

/// Open a connection pool with default options.
///
/// # Errors
///
/// Returns [`StoreError::Connection`] if the database cannot be reached.
pub async fn connect(database_url: &str) -> Result<PgPool, StoreError> {
    PgPool::connect(database_url)
        .await
        .map_err(|e| StoreError::Connection(e.to_string()))
}

/// Apply the bundled schema migrations.
///
/// # Errors
///
/// Returns [`sqlx::migrate::MigrateError`] if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Classify a driver error. Pool and transport failures are connection
/// errors; row decoding failures are decode errors; the rest are query errors.
pub(crate) fn store_error(query: &'static str, error: &sqlx::Error) -> StoreError {
    let message = format!("{query}: {error}");
    match error {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Connection(message),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_) => StoreError::Decode(message),
        _ => StoreError::Query(message),
    }
}

/// Await `future`, recording its duration under `query`.
pub(crate) async fn timed<T>(query: &'static str, future: impl Future<Output = T>) -> T {
    let started = Instant::now();
    let output = future.await;
    metrics::histogram!("hotel_gate_store_query_duration_seconds", "query" => query)
        .record(started.elapsed().as_secs_f64());
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_connection_errors() {
        assert!(matches!(
            store_error("find_enrollment", &sqlx::Error::PoolTimedOut),
            StoreError::Connection(_)
        ));
        assert!(matches!(
            store_error("find_enrollment", &sqlx::Error::PoolClosed),
            StoreError::Connection(_)
        ));
    }

    #[test]
    fn test_decode_errors_are_decode_errors() {
        let err = store_error(
            "list_hotels",
            &sqlx::Error::ColumnNotFound("image".to_string()),
        );
        assert!(matches!(err, StoreError::Decode(ref m) if m.starts_with("list_hotels: ")));
    }

    #[test]
    fn test_other_errors_are_query_errors() {
        assert!(matches!(
            store_error("find_hotel", &sqlx::Error::RowNotFound),
            StoreError::Query(_)
        ));
    }
}
