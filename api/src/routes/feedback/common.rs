use crate::response::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::feedback::Model as FeedbackModel;
use serde::Serialize;
use services::error::ServiceError;

/// External shape of a relational feedback row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub id: i64,
    pub presentation_id: String,
    pub slide_id: String,
    pub slide_index: Option<i32>,
    pub feedback_text: String,
    pub reviewer_name: Option<String>,
    pub reviewer_email: Option<String>,
    pub feedback_type: String,
    pub metadata: Option<serde_json::Value>,
    pub form_id: String,
    pub session_id: Option<String>,
    pub question_hash: Option<String>,
    pub form_context: Option<serde_json::Value>,
    pub created_at: String,
}

impl From<FeedbackModel> for FeedbackResponse {
    fn from(row: FeedbackModel) -> Self {
        Self {
            id: row.id,
            presentation_id: row.presentation_id,
            slide_id: row.slide_id,
            slide_index: row.slide_index,
            feedback_text: row.feedback_text,
            reviewer_name: row.reviewer_name,
            reviewer_email: row.reviewer_email,
            feedback_type: row.feedback_type.to_string(),
            metadata: row.metadata,
            form_id: row.form_id,
            session_id: row.session_id,
            question_hash: row.question_hash,
            form_context: row.form_context,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

/// Maps a service failure onto its status code and envelope.
///
/// - `Validation` → `400 { success: false, errors }`
/// - `Configuration` → `400 { success: false, error }`
/// - `Storage` → `500 { success: false, error }`
pub fn error_response(err: ServiceError) -> Response {
    match err {
        ServiceError::Validation(errors) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::invalid(errors)),
        )
            .into_response(),
        ServiceError::Configuration(message) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::failed(message)),
        )
            .into_response(),
        ServiceError::Storage(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::failed(message)),
        )
            .into_response(),
    }
}

/// `400` for a body or query string that could not be parsed at all.
pub fn malformed_request(detail: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::invalid(vec![detail])),
    )
        .into_response()
}
