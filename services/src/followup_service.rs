use crate::error::ServiceError;
use followup::{
    ConversationMessage, ConversationState, Decision, FeedbackQuestionConfig, FollowUpEngine,
    TerminationReason,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const NOT_CONFIGURED_MESSAGE: &str = "AI service not configured";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate follow-up question";
pub const UNREADABLE_REQUEST_MESSAGE: &str = "Could not read follow-up request";

/// Body of `POST /feedback/followup`. The client resends the whole transcript each turn.
///
/// Only `questionConfig` and `userResponse` are strict. History entries that do not
/// decode are skipped, and a budget that is not an integer falls back to the default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpRequest {
    pub question_config: Option<FeedbackQuestionConfig>,
    pub user_response: Option<String>,
    #[serde(default, deserialize_with = "lenient_history")]
    pub conversation_history: Vec<ConversationMessage>,
    #[serde(default, deserialize_with = "lenient_budget")]
    pub remaining_follow_ups: Option<i64>,
}

fn lenient_history<'de, D>(deserializer: D) -> Result<Vec<ConversationMessage>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(message) => Some(message),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable history entry");
                None
            }
        })
        .collect())
}

/// Integers pass through, integer strings are parsed, anything else is treated as absent.
fn lenient_budget<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_u64().map(|_| i64::MAX)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn missing_fields(body: &Value) -> Vec<String> {
    ["questionConfig", "userResponse"]
        .into_iter()
        .filter(|field| body.get(field).is_none_or(Value::is_null))
        .map(|field| format!("{field} is required"))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpResponse {
    pub should_continue: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_reason: Option<TerminationReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FollowUpResponse {
    pub fn ask(question: impl Into<String>) -> Self {
        Self {
            should_continue: true,
            follow_up_question: Some(question.into()),
            completion_reason: None,
            error: None,
        }
    }

    pub fn stop(reason: TerminationReason) -> Self {
        Self {
            should_continue: false,
            follow_up_question: None,
            completion_reason: Some(reason),
            error: None,
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::stop(TerminationReason::Error)
        }
    }
}

impl From<Decision> for FollowUpResponse {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Continue { question } => FollowUpResponse::ask(question),
            Decision::Stop {
                reason: TerminationReason::Error,
            } => FollowUpResponse::failed(GENERATION_FAILED_MESSAGE),
            Decision::Stop { reason } => FollowUpResponse::stop(reason),
        }
    }
}

impl FollowUpRequest {
    /// Rebuilds the conversation state. A missing budget uses `default_budget`;
    /// a negative one counts as spent.
    pub fn into_turn(
        self,
        default_budget: u32,
    ) -> Result<(ConversationState, String), ServiceError> {
        let mut errors = Vec::new();
        if self.question_config.is_none() {
            errors.push("questionConfig is required".to_string());
        }
        if self.user_response.is_none() {
            errors.push("userResponse is required".to_string());
        }

        let (Some(question), Some(latest)) = (self.question_config, self.user_response) else {
            return Err(ServiceError::Validation(errors));
        };

        let remaining = match self.remaining_follow_ups {
            Some(n) => u32::try_from(n.max(0)).unwrap_or(u32::MAX),
            None => default_budget,
        };

        Ok((
            ConversationState::new(question, self.conversation_history, remaining),
            latest,
        ))
    }
}

/// Runs one conversation turn. Holds no per-conversation state.
#[derive(Clone)]
pub struct FollowUpService {
    engine: Option<FollowUpEngine>,
    default_budget: u32,
}

impl FollowUpService {
    /// `engine` is `None` when no model credential is configured.
    pub fn new(engine: Option<FollowUpEngine>, default_budget: u32) -> Self {
        Self {
            engine,
            default_budget,
        }
    }

    /// Budget used when a request carries none.
    pub fn default_budget(&self) -> u32 {
        self.default_budget
    }

    /// Entry point for a raw JSON body.
    ///
    /// An absent (or null) `questionConfig` or `userResponse` is a validation error.
    /// A body that has both but still does not decode ends the conversation with `error`.
    pub async fn respond_to_body(&self, body: Value) -> Result<FollowUpResponse, ServiceError> {
        let missing = missing_fields(&body);
        if !missing.is_empty() {
            return Err(ServiceError::Validation(missing));
        }

        match serde_json::from_value::<FollowUpRequest>(body) {
            Ok(request) => self.respond(request).await,
            Err(err) => {
                tracing::warn!(error = %err, "unreadable follow-up request");
                Ok(FollowUpResponse::failed(UNREADABLE_REQUEST_MESSAGE))
            }
        }
    }

    /// Only a structurally incomplete request is an error; everything else,
    /// including a missing credential, is reported as a terminal response.
    pub async fn respond(&self, request: FollowUpRequest) -> Result<FollowUpResponse, ServiceError> {
        let (state, latest) = request.into_turn(self.default_budget)?;

        let Some(engine) = &self.engine else {
            tracing::warn!("follow-up requested but no model credential is configured");
            return Ok(FollowUpResponse::failed(NOT_CONFIGURED_MESSAGE));
        };

        let decision = engine.decide(&state, &latest).await;
        tracing::debug!(
            question_id = %state.question.id,
            should_continue = decision.should_continue(),
            reason = decision.reason().map(|r| r.as_str()).unwrap_or("-"),
            "follow-up decision"
        );
        Ok(decision.into())
    }
}
