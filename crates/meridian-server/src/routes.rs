//! Route definitions.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `state` - Shared application state (registry, price source, profiles)
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Strategy pages
        .route("/api/strategies/:name/intro", get(handlers::strategy_intro))
        .route(
            "/api/strategies/:name/performance",
            get(handlers::strategy_performance),
        )
        // State
        .with_state(state)
}
