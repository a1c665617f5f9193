use super::common::{FeedbackResponse, error_response, malformed_request};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::feedback_service::FeedbackQuery;

/// GET /feedback
///
/// Lists single-answer feedback, newest first.
///
/// ### Query Parameters
/// - `presentationId`, `slideId`, `feedbackType`, `formId`, `sessionId`: exact matches, combined with AND
/// - `limit` (default 100, max 1000), `offset` (default 0)
///
/// ### Responses
/// - `200 OK` → array of feedback records in camelCase
/// - `400 Bad Request` → unknown `feedbackType` or non-numeric `limit`/`offset`
/// - `500 Internal Server Error` → `{ "success": false, "error": "Failed to fetch feedback" }`
pub async fn list_feedback(
    State(app_state): State<AppState>,
    query: Result<Query<FeedbackQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return malformed_request(rejection.body_text()),
    };

    match app_state.feedback().list(query).await {
        Ok(rows) => {
            let body: Vec<FeedbackResponse> = rows.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}
