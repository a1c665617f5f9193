use db::documents::DocumentStoreError;
use thiserror::Error;

/// Failure taxonomy shared by every feedback-facing service.
///
/// Messages carried here are safe to return to clients. Underlying causes are
/// logged where the error is created and dropped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Storage(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(vec![message.into()])
    }

    /// Logs `cause` and returns a generic storage error with `message`.
    pub fn storage(message: &str, cause: impl std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "{message}");
        ServiceError::Storage(message.to_string())
    }

    pub fn from_document_store(message: &str, err: DocumentStoreError) -> Self {
        match err {
            DocumentStoreError::NotConfigured => {
                ServiceError::Configuration("Document store not configured".to_string())
            }
            DocumentStoreError::Db(cause) => ServiceError::storage(message, cause),
        }
    }
}
