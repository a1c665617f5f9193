use serde::Serialize;

/// Standardized wrapper for informational endpoints such as `/health`.
///
/// ```json
/// { "success": true, "data": "OK", "message": "Health check passed" }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }
}

/// Success envelope of the submission endpoints.
///
/// `{ "success": true, "id": 7 }` for one relational row,
/// `{ "success": true, "ids": ["..", ".."] }` for stored documents.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SubmissionResponse {
    Created { success: bool, id: i64 },
    CreatedMany { success: bool, ids: Vec<String> },
}

impl SubmissionResponse {
    pub fn created(id: i64) -> Self {
        SubmissionResponse::Created { success: true, id }
    }

    pub fn created_many(ids: Vec<String>) -> Self {
        SubmissionResponse::CreatedMany { success: true, ids }
    }
}

/// Failure envelope shared by every feedback endpoint.
///
/// `errors` lists each validation problem; `error` is a single generic message.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorResponse {
    Invalid { success: bool, errors: Vec<String> },
    Failed { success: bool, error: String },
}

impl ErrorResponse {
    pub fn invalid(errors: Vec<String>) -> Self {
        ErrorResponse::Invalid {
            success: false,
            errors,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        ErrorResponse::Failed {
            success: false,
            error: error.into(),
        }
    }
}
