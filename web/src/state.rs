//! Application state for Axum handlers.

use hotel_gate_core::{AccessController, SessionStore};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloning is cheap: the controller and session store hold only `Arc` handles.
#[derive(Clone)]
pub struct AppState {
    /// Entitlement gate and hotel catalog
    pub controller: AccessController,
    /// Bearer token resolution
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(controller: AccessController, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            controller,
            sessions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_clone() {
        // Axum requires Clone state
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }
}
