//! Router configuration.

use crate::handlers::{get_hotel, get_hotels, health_check};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// - `GET /health` (no authentication)
/// - `GET /hotels`
/// - `GET /hotels/:hotelId`
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/hotels", get(get_hotels))
        .route("/hotels/:hotelId", get(get_hotel))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
}
