//! `/feedback` route group.
//!
//! - `POST /feedback` → [`post::submit_feedback`]
//! - `GET  /feedback` → [`get::list_feedback`]
//! - `POST /feedback/followup` → [`followup::next_follow_up`]
//! - `POST /feedback/conversations` → [`conversations::submit_conversation`]
//! - `GET  /feedback/conversations` → [`conversations::list_conversations`]
//! - `GET  /feedback/conversations/options` → [`conversations::option_counts`]

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub mod common;
pub mod conversations;
pub mod followup;
pub mod get;
pub mod post;

use conversations::{list_conversations, option_counts, submit_conversation};
use followup::next_follow_up;
use get::list_feedback;
use post::submit_feedback;

pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_feedback).get(list_feedback))
        .route("/followup", post(next_follow_up))
        .route(
            "/conversations",
            post(submit_conversation).get(list_conversations),
        )
        .route("/conversations/options", get(option_counts))
}
