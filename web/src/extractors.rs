//! Custom Axum extractors.
//!
//! - `CorrelationId`: the request's correlation ID
//! - `BearerToken`: the raw token from `Authorization: Bearer <token>`
//! - `SessionUser`: the user owning that token, resolved through the session store
//!
//! # Examples
//!
//! ```ignore
//! async fn handler(
//!     State(state): State<AppState>,
//!     session: SessionUser,
//!     correlation_id: CorrelationId,
//! ) -> Result<Json<Vec<Hotel>>, AppError> {
//!     tracing::info!(
//!         correlation_id = %correlation_id.0,
//!         user_id = %session.user_id,
//!         "Processing request"
//!     );
//!     Ok(Json(hotels))
//! }
//! ```

use crate::error::AppError;
use crate::middleware::CORRELATION_ID_HEADER;
use crate::state::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use hotel_gate_core::UserId;
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Prefers the ID stored by the correlation middleware, then the
/// `X-Correlation-ID` header, and generates a new UUID v4 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Uuid>() {
            return Ok(Self(*id));
        }

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

/// Bearer token extracted from `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization format. Expected 'Bearer <token>'")
        })?;

        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::unauthorized("Empty bearer token"));
        }

        Ok(Self(token.to_string()))
    }
}

/// Authenticated session user.
///
/// Use as a handler parameter to require a valid session.
#[derive(Debug, Clone, Copy)]
pub struct SessionUser {
    /// The user owning the bearer token
    pub user_id: UserId,
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = BearerToken::from_request_parts(parts, state).await?;

        match state.sessions.find_user_by_token(&bearer.0).await? {
            Some(user_id) => Ok(Self { user_id }),
            None => {
                tracing::debug!("Rejected unknown session token");
                Err(AppError::unauthorized("Invalid session"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use hotel_gate_core::{AccessController, EntitlementResolver, HotelCatalog};
    use hotel_gate_testing::{InMemoryEntitlementStore, InMemoryHotelStore, InMemorySessionStore};
    use std::sync::Arc;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder();
        if let Some(value) = header {
            builder = builder.header("authorization", value);
        }
        let req = builder.body(()).expect("Valid request");
        req.into_parts().0
    }

    fn state(sessions: InMemorySessionStore) -> AppState {
        let controller = AccessController::new(
            EntitlementResolver::new(Arc::new(InMemoryEntitlementStore::new())),
            HotelCatalog::new(Arc::new(InMemoryHotelStore::new())),
        );
        AppState::new(controller, Arc::new(sessions))
    }

    #[tokio::test]
    async fn test_correlation_id_from_header() {
        let uuid = Uuid::new_v4();
        let req = Request::builder()
            .header(CORRELATION_ID_HEADER, uuid.to_string())
            .body(())
            .expect("Valid request");

        let (mut parts, _) = req.into_parts();
        let correlation_id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_eq!(correlation_id.0, uuid);
    }

    #[tokio::test]
    async fn test_correlation_id_prefers_extension() {
        let stored = Uuid::new_v4();
        let mut parts = parts_with(None);
        parts.extensions.insert(stored);

        let correlation_id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_eq!(correlation_id.0, stored);
    }

    #[tokio::test]
    async fn test_bearer_token_parsed() {
        let mut parts = parts_with(Some("Bearer abc123"));
        let token = BearerToken::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");
        assert_eq!(token.0, "abc123");
    }

    #[tokio::test]
    async fn test_bearer_token_rejections() {
        for header in [None, Some("Basic abc"), Some("Bearer "), Some("abc")] {
            let mut parts = parts_with(header);
            let err = BearerToken::from_request_parts(&mut parts, &())
                .await
                .expect_err("Should reject");
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED, "header {header:?}");
        }
    }

    #[tokio::test]
    async fn test_session_user_resolved() {
        let sessions = InMemorySessionStore::new();
        sessions.insert_session("abc123", UserId::new(7));
        let state = state(sessions);

        let mut parts = parts_with(Some("Bearer abc123"));
        let session = SessionUser::from_request_parts(&mut parts, &state)
            .await
            .expect("Should extract");
        assert_eq!(session.user_id, UserId::new(7));
    }

    #[tokio::test]
    async fn test_session_user_unknown_token() {
        let state = state(InMemorySessionStore::new());

        let mut parts = parts_with(Some("Bearer nope"));
        let err = SessionUser::from_request_parts(&mut parts, &state)
            .await
            .expect_err("Should reject");
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_session_store_failure_is_internal() {
        let sessions = InMemorySessionStore::new();
        sessions.fail_on_lookup();
        let state = state(sessions);

        let mut parts = parts_with(Some("Bearer abc123"));
        let err = SessionUser::from_request_parts(&mut parts, &state)
            .await
            .expect_err("Should fail");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
