//! Hotel gate server.
//!
//! Wires the `PostgreSQL` stores into the access controller and serves the
//! HTTP API next to a Prometheus scrape endpoint.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod telemetry;

pub use config::{Config, ConfigError, PostgresConfig, ServerConfig};

use hotel_gate_core::{AccessController, EntitlementResolver, HotelCatalog};
use hotel_gate_postgres::{
    PgPool, PgPoolOptions, PostgresEntitlementStore, PostgresHotelStore, PostgresSessionStore,
};
use hotel_gate_web::AppState;
use std::sync::Arc;
use std::time::Duration;

/// Build a connection pool from configuration.
///
/// # Errors
///
/// Returns error if the database cannot be reached within the connect timeout.
pub async fn connect_pool(config: &PostgresConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Some(Duration::from_secs(config.idle_timeout)))
        .connect(&config.url)
        .await?;

    Ok(pool)
}

/// Wire stores, gate, and catalog over one pool.
#[must_use]
pub fn build_state(pool: &PgPool) -> AppState {
    let controller = AccessController::new(
        EntitlementResolver::new(Arc::new(PostgresEntitlementStore::new(pool.clone()))),
        HotelCatalog::new(Arc::new(PostgresHotelStore::new(pool.clone()))),
    );

    AppState::new(controller, Arc::new(PostgresSessionStore::new(pool.clone())))
}
