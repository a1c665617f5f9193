use super::common::{error_response, malformed_request};
use crate::{response::SubmissionResponse, state::AppState};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::conversation_service::{ConversationQuery, ConversationSubmission};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionCountQuery {
    pub slide_id: Option<String>,
}

/// POST /feedback/conversations
///
/// Stores conversational feedback. `response` writes one document, `responses` writes
/// one document per entry, all sharing the top-level fields and one `createdAt`.
///
/// ### Request Body
/// ```json
/// {
///   "presentationId": "deck-1",
///   "moduleId": "onboarding",
///   "formId": "end-of-deck",
///   "sessionId": "sess-42",
///   "reviewer": { "name": "Ana" },
///   "responses": [
///     { "slideId": "poll", "response": { "optionId": "yes", "optionLabel": "Yes" } },
///     {
///       "slideId": "open",
///       "slideContent": { "title": "Roadmap" },
///       "feedbackType": "content",
///       "response": {
///         "text": "Maybe",
///         "followUps": [{ "role": "engine", "content": "Can you give a specific example?" }],
///         "completionReason": "max_reached"
///       }
///     }
///   ]
/// }
/// ```
///
/// ### Responses
/// - `201 Created` → `{ "success": true, "ids": ["..", ".."] }`
/// - `400 Bad Request` → `{ "success": false, "errors": [..] }` or store not configured
/// - `500 Internal Server Error` → `{ "success": false, "error": "Failed to save feedback" }`
pub async fn submit_conversation(
    State(app_state): State<AppState>,
    payload: Result<Json<ConversationSubmission>, JsonRejection>,
) -> Response {
    let Json(submission) = match payload {
        Ok(body) => body,
        Err(rejection) => return malformed_request(rejection.body_text()),
    };

    match app_state.conversations().submit(submission).await {
        Ok(ids) => (
            StatusCode::CREATED,
            Json(SubmissionResponse::created_many(ids)),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /feedback/conversations
///
/// Filters on `presentationId`, `moduleId`, `formId`, `sessionId`, `slideId`.
/// Newest submission first; questions of one submission keep their order.
pub async fn list_conversations(
    State(app_state): State<AppState>,
    query: Result<Query<ConversationQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return malformed_request(rejection.body_text()),
    };

    match app_state.conversations().list(query).await {
        Ok(documents) => (StatusCode::OK, Json(documents)).into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /feedback/conversations/options?slideId=poll
///
/// Counts stored answers per `response.optionId`, e.g. `{ "yes": 12, "no": 3 }`.
/// Answers without an option are not counted.
pub async fn option_counts(
    State(app_state): State<AppState>,
    query: Result<Query<OptionCountQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return malformed_request(rejection.body_text()),
    };

    match app_state.conversations().option_counts(query.slide_id).await {
        Ok(counts) => (StatusCode::OK, Json(counts)).into_response(),
        Err(err) => error_response(err),
    }
}
