//! HTTP route entry point.
//!
//! Route groups:
//! - `/health` → liveness probe
//! - `/feedback` → feedback submission, listing, follow-up turns, and conversations

use crate::routes::{feedback::feedback_routes, health::health_routes};
use crate::state::AppState;
use axum::Router;

pub mod feedback;
pub mod health;

/// Builds the application router with its state attached.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/feedback", feedback_routes())
        .with_state(app_state)
}
