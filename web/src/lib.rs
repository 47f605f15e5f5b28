//! Axum HTTP boundary for the hotel gate.
//!
//! Translates bearer-authenticated requests into [`AccessController`] calls
//! and gate outcomes into status codes.
//!
//! ```text
//! Found(..)                 → 200 JSON
//! Denied(NotFound)          → 404
//! Denied(PaymentRequired)   → 402
//! Err(AccessError)          → 500
//! ```
//!
//! # Example
//!
//! ```ignore
//! use hotel_gate_web::{AppState, build_router};
//!
//! let app = build_router(AppState::new(controller, Arc::new(sessions)));
//! axum::serve(listener, app).await?;
//! ```
//!
//! [`AccessController`]: hotel_gate_core::AccessController

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{BearerToken, CorrelationId, SessionUser};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
