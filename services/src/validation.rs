//! Shape and size checks for single-answer feedback submissions.
//!
//! Every rule is evaluated; violations come back together, one message per rule, in
//! field order (`presentationId`, `slideId`, `feedbackText`, `feedbackType`).

use db::models::feedback::FeedbackType;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

pub const MAX_FEEDBACK_TEXT_CHARS: usize = 10_000;

/// Field order used when reporting violations.
const FIELD_ORDER: [&str; 4] = ["presentationid", "slideid", "feedbacktext", "feedbacktype"];

/// Body of `POST /feedback`, as received.
///
/// Required fields are optional here so that a missing field is reported as a
/// validation error instead of a deserialisation failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    #[validate(
        required(message = "presentationId is required"),
        custom(function = "not_blank", message = "presentationId is required")
    )]
    pub presentation_id: Option<String>,

    #[validate(
        required(message = "slideId is required"),
        custom(function = "not_blank", message = "slideId is required")
    )]
    pub slide_id: Option<String>,

    pub slide_index: Option<i32>,

    #[validate(
        required(message = "feedbackText is required"),
        custom(function = "feedback_text_in_bounds")
    )]
    pub feedback_text: Option<String>,

    pub reviewer_name: Option<String>,
    pub reviewer_email: Option<String>,

    #[validate(custom(
        function = "known_feedback_type",
        message = "feedbackType must be one of: general, content, design, accuracy"
    ))]
    pub feedback_type: Option<String>,

    pub metadata: Option<serde_json::Value>,

    pub form_id: Option<String>,
    pub session_id: Option<String>,
    pub question_hash: Option<String>,
    pub question_text: Option<String>,
    pub form_context: Option<serde_json::Value>,
}

/// Outcome of [`validate_submission`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn feedback_text_in_bounds(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("feedbackText is required")));
    }
    if value.chars().count() > MAX_FEEDBACK_TEXT_CHARS {
        return Err(ValidationError::new("too_long").with_message(Cow::Owned(format!(
            "feedbackText must be at most {MAX_FEEDBACK_TEXT_CHARS} characters"
        ))));
    }
    Ok(())
}

fn known_feedback_type(value: &str) -> Result<(), ValidationError> {
    if FeedbackType::ALLOWED.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_feedback_type"))
    }
}

fn field_rank(field: &str) -> usize {
    let normalized: String = field
        .chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    FIELD_ORDER
        .iter()
        .position(|f| *f == normalized)
        .unwrap_or(FIELD_ORDER.len())
}

/// Flattens validator output into client-facing messages, in field order.
pub fn collect_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| field_rank(field));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(|e| match &e.message {
                    Some(m) => m.to_string(),
                    None => format!("{field} is invalid"),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn validate_submission(submission: &FeedbackSubmission) -> ValidationReport {
    match submission.validate() {
        Ok(()) => ValidationReport {
            valid: true,
            errors: Vec::new(),
        },
        Err(errors) => ValidationReport {
            valid: false,
            errors: collect_messages(&errors),
        },
    }
}
