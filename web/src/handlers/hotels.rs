//! Hotel endpoints.
//!
//! Both endpoints run the entitlement gate first; catalog data is only read
//! for users holding a paid, in-person ticket that includes lodging.

use crate::WebResult;
use crate::error::AppError;
use crate::extractors::{CorrelationId, SessionUser};
use crate::metrics::{OUTCOME_ERROR, record_request};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use hotel_gate_core::{AccessError, DenialReason, GateResult, Hotel, HotelId, HotelWithRooms};
use std::time::Instant;

/// List all hotels.
///
/// # Endpoint
///
/// ```text
/// GET /hotels
/// Authorization: Bearer <token>
/// ```
///
/// # Responses
///
/// - 200 OK: JSON array of hotels
/// - 402 Payment Required: ticket unpaid, remote, or without lodging
/// - 404 Not Found: no enrollment, no ticket, or no hotels
///
/// # Errors
///
/// Returns [`AppError`] for every non-200 response.
pub async fn get_hotels(
    State(state): State<AppState>,
    session: SessionUser,
    correlation_id: CorrelationId,
) -> WebResult<Json<Vec<Hotel>>> {
    let started = Instant::now();
    let result = state.controller.get_hotels(session.user_id).await;

    tracing::debug!(
        correlation_id = %correlation_id.0,
        user_id = %session.user_id,
        "Hotel list request handled"
    );

    respond("get_hotels", started, result)
}

/// Get one hotel with its rooms.
///
/// A path segment that is not an integer is answered like a missing hotel:
/// the gate still runs, and only an entitled user sees 404.
///
/// # Endpoint
///
/// ```text
/// GET /hotels/:hotelId
/// Authorization: Bearer <token>
/// ```
///
/// # Responses
///
/// - 200 OK: hotel object with a `Rooms` array
/// - 402 Payment Required: ticket unpaid, remote, or without lodging
/// - 404 Not Found: no enrollment, no ticket, or no such hotel
///
/// # Errors
///
/// Returns [`AppError`] for every non-200 response.
pub async fn get_hotel(
    State(state): State<AppState>,
    session: SessionUser,
    correlation_id: CorrelationId,
    Path(hotel_id): Path<String>,
) -> WebResult<Json<HotelWithRooms>> {
    let started = Instant::now();

    let result = match hotel_id.parse::<i32>().map(HotelId::new) {
        Ok(hotel_id) => {
            let result = state.controller.get_hotel(session.user_id, hotel_id).await;
            tracing::debug!(
                correlation_id = %correlation_id.0,
                user_id = %session.user_id,
                %hotel_id,
                "Hotel request handled"
            );
            result
        }
        Err(_) => {
            tracing::debug!(
                correlation_id = %correlation_id.0,
                user_id = %session.user_id,
                hotel_id = %hotel_id,
                "Non-numeric hotel id, checking entitlement only"
            );
            state
                .controller
                .check_access(session.user_id)
                .await
                .map(no_such_hotel)
        }
    };

    respond("get_hotel", started, result)
}

/// An entitled user asking for a hotel that cannot exist.
fn no_such_hotel(gate: GateResult<()>) -> GateResult<HotelWithRooms> {
    match gate {
        GateResult::Found(()) => GateResult::Denied(DenialReason::NotFound),
        GateResult::Denied(reason) => GateResult::Denied(reason),
    }
}

fn respond<T>(
    endpoint: &'static str,
    started: Instant,
    result: Result<GateResult<T>, AccessError>,
) -> WebResult<Json<T>> {
    let elapsed = started.elapsed().as_secs_f64();
    match result {
        Ok(GateResult::Found(body)) => {
            record_request(endpoint, "found", elapsed);
            Ok(Json(body))
        }
        Ok(GateResult::Denied(reason)) => {
            record_request(endpoint, reason.as_str(), elapsed);
            Err(AppError::from(reason))
        }
        Err(err) => {
            record_request(endpoint, OUTCOME_ERROR, elapsed);
            Err(AppError::from(err))
        }
    }
}
