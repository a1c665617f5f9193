//! HTTP surface for slide feedback collection.
//!
//! - `GET  /health`
//! - `POST /feedback`, `GET /feedback`: single-answer feedback (relational store)
//! - `POST /feedback/followup`: one turn of the follow-up conversation
//! - `POST /feedback/conversations`, `GET /feedback/conversations`,
//!   `GET /feedback/conversations/options`: conversational feedback (document store)

pub mod response;
pub mod routes;
pub mod state;

use axum::Router;
use axum::http::Method;
use state::AppState;
use tower_http::cors::{Any, CorsLayer};

/// Any origin may call the API; only the verbs the routes use are allowed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Full application router with CORS applied.
pub fn app(app_state: AppState) -> Router {
    routes::routes(app_state).layer(cors_layer())
}
