use super::common::{error_response, malformed_request};
use crate::state::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// POST /feedback/followup
///
/// Runs one turn of the follow-up conversation. The client sends the full transcript
/// every time; nothing is kept between calls.
///
/// ### Request Body
/// ```json
/// {
///   "questionConfig": { "id": "q1", "question": "How clear was the roadmap?", "contextSections": [] },
///   "userResponse": "Maybe",
///   "conversationHistory": [],
///   "remainingFollowUps": 2
/// }
/// ```
///
/// ### Responses
/// Always `200 OK` once the required fields are present:
/// - `{ "shouldContinue": true, "followUpQuestion": "Can you give a specific example?" }`
/// - `{ "shouldContinue": false, "completionReason": "user_done" }`
/// - `{ "shouldContinue": false, "completionReason": "error", "error": "AI service not configured" }`
///
/// Mistyped optional fields do not fail the request: an unreadable `remainingFollowUps`
/// uses the default budget and unreadable history entries are dropped.
///
/// `400 Bad Request` only when `questionConfig` or `userResponse` is missing, or the
/// body is not JSON at all.
pub async fn next_follow_up(
    State(app_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => return malformed_request(rejection.body_text()),
    };

    match app_state.followups().respond_to_body(body).await {
        Ok(turn) => (StatusCode::OK, Json(turn)).into_response(),
        Err(err) => error_response(err),
    }
}
