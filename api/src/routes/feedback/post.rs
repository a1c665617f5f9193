use super::common::{error_response, malformed_request};
use crate::{response::SubmissionResponse, state::AppState};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::validation::FeedbackSubmission;

/// POST /feedback
///
/// Stores one answer to one slide question.
///
/// ### Request Body
/// ```json
/// {
///   "presentationId": "deck-1",
///   "slideId": "pricing",
///   "slideIndex": 4,
///   "feedbackText": "Too many tiers",
///   "feedbackType": "content",
///   "formId": "exit-survey",
///   "sessionId": "abc",
///   "questionText": "Was the pricing clear?"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` → `{ "success": true, "id": 12 }`
/// - `400 Bad Request` → `{ "success": false, "errors": ["slideId is required"] }`
/// - `500 Internal Server Error` → `{ "success": false, "error": "Failed to save feedback" }`
pub async fn submit_feedback(
    State(app_state): State<AppState>,
    payload: Result<Json<FeedbackSubmission>, JsonRejection>,
) -> Response {
    let Json(submission) = match payload {
        Ok(body) => body,
        Err(rejection) => return malformed_request(rejection.body_text()),
    };

    match app_state.feedback().submit(submission).await {
        Ok(id) => (StatusCode::CREATED, Json(SubmissionResponse::created(id))).into_response(),
        Err(err) => error_response(err),
    }
}
