//! Follow-up Error Types
//!
//! [`GenerationError`] covers every way the language-model collaborator can fail.
//! The engine converts all of them into [`TerminationReason::Error`](crate::types::TerminationReason::Error);
//! they are only surfaced to logs.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// No credential was supplied for the collaborator.
    #[error("AI service not configured")]
    NotConfigured,
    /// The call did not complete within the configured bound.
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body could not be understood or held no text.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerationError::Transport(format!("request timed out: {err}"))
        } else {
            GenerationError::Transport(err.to_string())
        }
    }
}
