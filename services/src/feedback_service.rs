use crate::error::ServiceError;
use crate::hashing::hash_question;
use crate::validation::{validate_submission, FeedbackSubmission};
use db::filters::{FeedbackFilter, Pagination};
use db::models::feedback::{FeedbackType, Model, NewFeedback};
use db::repositories::feedback_repository::FeedbackRepository;
use sea_orm::DatabaseConnection;
use serde::Deserialize;

/// Query string accepted by `GET /feedback`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuery {
    pub presentation_id: Option<String>,
    pub slide_id: Option<String>,
    pub feedback_type: Option<String>,
    pub form_id: Option<String>,
    pub session_id: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl FeedbackQuery {
    /// Blank parameters are ignored. An unknown `feedbackType` is a validation error.
    pub fn into_parts(self) -> Result<(FeedbackFilter, Pagination), ServiceError> {
        let feedback_type = match non_blank(self.feedback_type) {
            Some(raw) => Some(raw.parse::<FeedbackType>().map_err(|_| {
                ServiceError::validation(
                    "feedbackType must be one of: general, content, design, accuracy",
                )
            })?),
            None => None,
        };

        let filter = FeedbackFilter {
            presentation_id: non_blank(self.presentation_id),
            slide_id: non_blank(self.slide_id),
            feedback_type,
            form_id: non_blank(self.form_id),
            session_id: non_blank(self.session_id),
        };

        Ok((filter, Pagination::new(self.limit, self.offset)))
    }
}

impl FeedbackSubmission {
    /// Converts an already validated submission into insert values.
    ///
    /// `questionHash` is derived from `questionText` when the client did not send one.
    fn into_new_feedback(self) -> NewFeedback {
        let question_hash = non_blank(self.question_hash).or_else(|| {
            non_blank(self.question_text).map(|text| hash_question(&text))
        });
        let feedback_type = self
            .feedback_type
            .and_then(|t| t.parse().ok())
            .unwrap_or_default();

        NewFeedback {
            presentation_id: self.presentation_id.unwrap_or_default(),
            slide_id: self.slide_id.unwrap_or_default(),
            slide_index: self.slide_index,
            feedback_text: self.feedback_text.unwrap_or_default(),
            reviewer_name: self.reviewer_name,
            reviewer_email: self.reviewer_email,
            feedback_type,
            metadata: self.metadata,
            form_id: self.form_id,
            session_id: non_blank(self.session_id),
            question_hash,
            form_context: self.form_context,
        }
    }
}

/// Single-answer feedback over the relational store.
pub struct FeedbackService {
    repo: FeedbackRepository,
}

impl FeedbackService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repo: FeedbackRepository::new(db),
        }
    }

    /// Validates and stores one submission, returning the new row id.
    pub async fn submit(&self, submission: FeedbackSubmission) -> Result<i64, ServiceError> {
        let report = validate_submission(&submission);
        if !report.valid {
            return Err(ServiceError::Validation(report.errors));
        }

        let id = self
            .repo
            .insert(submission.into_new_feedback())
            .await
            .map_err(|e| ServiceError::storage("Failed to save feedback", e))?;

        tracing::info!(feedback_id = id, "feedback stored");
        Ok(id)
    }

    pub async fn list(&self, query: FeedbackQuery) -> Result<Vec<Model>, ServiceError> {
        let (filter, pagination) = query.into_parts()?;
        self.repo
            .query(&filter, pagination)
            .await
            .map_err(|e| ServiceError::storage("Failed to fetch feedback", e))
    }
}
