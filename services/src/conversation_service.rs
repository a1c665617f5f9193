//! Multi-question, conversational submissions backed by the document store.

use crate::error::ServiceError;
use db::documents::feedback_document::Model as FeedbackDocument;
use db::documents::{DocumentCommon, DocumentStoreHandle, QuestionDocument};
use db::filters::DocumentFilter;
use followup::{ConversationMessage, TerminationReason};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// What a reviewer answered for one question, including any follow-up dialogue.
///
/// Fields the client adds beyond these are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub follow_ups: Vec<ConversationMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_reason: Option<TerminationReason>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSubmission {
    pub slide_id: Option<String>,
    pub slide_content: Option<Value>,
    pub feedback_type: Option<String>,
    #[serde(default)]
    pub response: StructuredResponse,
}

/// Body of `POST /feedback/conversations`: shared fields plus one or many answers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSubmission {
    pub presentation_id: Option<String>,
    pub module_id: Option<String>,
    pub form_id: Option<String>,
    pub session_id: Option<String>,
    pub reviewer: Option<Value>,
    pub response: Option<QuestionSubmission>,
    pub responses: Option<Vec<QuestionSubmission>>,
}

/// Query string of `GET /feedback/conversations`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationQuery {
    pub presentation_id: Option<String>,
    pub module_id: Option<String>,
    pub form_id: Option<String>,
    pub session_id: Option<String>,
    pub slide_id: Option<String>,
}

impl From<ConversationQuery> for DocumentFilter {
    fn from(q: ConversationQuery) -> Self {
        let keep = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        DocumentFilter {
            presentation_id: keep(q.presentation_id),
            module_id: keep(q.module_id),
            form_id: keep(q.form_id),
            session_id: keep(q.session_id),
            slide_id: keep(q.slide_id),
        }
    }
}

enum Shape {
    Single(QuestionDocument),
    Batch(Vec<QuestionDocument>),
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn to_document(question: QuestionSubmission) -> Result<QuestionDocument, ServiceError> {
    let response = serde_json::to_value(&question.response)
        .map_err(|e| ServiceError::storage("Failed to encode response", e))?;
    Ok(QuestionDocument {
        slide_id: question.slide_id.unwrap_or_default(),
        slide_content: question.slide_content,
        response,
        feedback_type: question.feedback_type,
    })
}

impl ConversationSubmission {
    /// Checks every rule and splits the body into shared and per-question parts.
    fn into_parts(self) -> Result<(DocumentCommon, Shape), ServiceError> {
        let mut errors = Vec::new();
        if is_blank(&self.presentation_id) {
            errors.push("presentationId is required".to_string());
        }

        let questions = match (self.response, self.responses) {
            (Some(_), Some(_)) => {
                errors.push("send either response or responses, not both".to_string());
                None
            }
            (None, None) => {
                errors.push("response or responses is required".to_string());
                None
            }
            (Some(single), None) => Some((false, vec![single])),
            (None, Some(many)) => {
                if many.is_empty() {
                    errors.push("responses must not be empty".to_string());
                }
                Some((true, many))
            }
        };

        if let Some((batch, list)) = &questions {
            for (index, question) in list.iter().enumerate() {
                if is_blank(&question.slide_id) {
                    errors.push(if *batch {
                        format!("responses[{index}].slideId is required")
                    } else {
                        "response.slideId is required".to_string()
                    });
                }
            }
        }

        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        let common = DocumentCommon {
            presentation_id: self.presentation_id.unwrap_or_default(),
            module_id: self.module_id,
            form_id: self.form_id,
            session_id: self.session_id,
            reviewer: self.reviewer,
        };

        let (batch, list) = questions.unwrap_or_default();
        let shape = if batch {
            Shape::Batch(
                list.into_iter()
                    .map(to_document)
                    .collect::<Result<Vec<_>, _>>()?,
            )
        } else {
            match list.into_iter().next() {
                Some(single) => Shape::Single(to_document(single)?),
                None => Shape::Batch(Vec::new()),
            }
        };
        Ok((common, shape))
    }
}

/// Conversational feedback over the shared document store handle.
#[derive(Clone)]
pub struct ConversationService {
    documents: DocumentStoreHandle,
}

impl ConversationService {
    pub fn new(documents: DocumentStoreHandle) -> Self {
        Self { documents }
    }

    fn ensure_configured(&self) -> Result<(), ServiceError> {
        if self.documents.is_configured() {
            Ok(())
        } else {
            Err(ServiceError::Configuration(
                "Document store not configured".to_string(),
            ))
        }
    }

    /// Stores one document per answered question and returns their ids in order.
    pub async fn submit(
        &self,
        submission: ConversationSubmission,
    ) -> Result<Vec<String>, ServiceError> {
        self.ensure_configured()?;
        let (common, shape) = submission.into_parts()?;

        let store = self
            .documents
            .get()
            .await
            .map_err(|e| ServiceError::from_document_store("Failed to save feedback", e))?;

        let result = match shape {
            Shape::Single(question) => store.insert_one(&common, question).await.map(|id| vec![id]),
            Shape::Batch(questions) => store.insert_batch(&common, questions).await,
        };

        let ids = result.map_err(|e| ServiceError::storage("Failed to save feedback", e))?;
        tracing::info!(
            presentation_id = %common.presentation_id,
            documents = ids.len(),
            "conversation feedback stored"
        );
        Ok(ids)
    }

    pub async fn list(
        &self,
        query: ConversationQuery,
    ) -> Result<Vec<FeedbackDocument>, ServiceError> {
        self.ensure_configured()?;
        let store = self
            .documents
            .get()
            .await
            .map_err(|e| ServiceError::from_document_store("Failed to fetch feedback", e))?;

        store
            .query(&query.into())
            .await
            .map_err(|e| ServiceError::storage("Failed to fetch feedback", e))
    }

    /// Per-option tallies for one slide.
    pub async fn option_counts(
        &self,
        slide_id: Option<String>,
    ) -> Result<BTreeMap<String, u64>, ServiceError> {
        self.ensure_configured()?;
        let slide_id = slide_id
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ServiceError::validation("slideId is required"))?;

        let store = self
            .documents
            .get()
            .await
            .map_err(|e| ServiceError::from_document_store("Failed to count options", e))?;

        store
            .count_distinct_option(&slide_id)
            .await
            .map_err(|e| ServiceError::storage("Failed to count options", e))
    }
}
