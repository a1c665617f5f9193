//! # Conversation Decision Engine
//!
//! Given the reconstructed [`ConversationState`] and the reviewer's latest answer,
//! [`FollowUpEngine::decide`] returns either the next follow-up question or a terminal
//! [`TerminationReason`]. Steps, each short-circuiting:
//!
//! 1. Completion heuristic matched → `user_done`.
//! 2. Budget exhausted → `max_reached`.
//! 3. One bounded call to the [`TextGenerator`]:
//!    - failure or timeout → `error` (never propagated, never retried);
//!    - response contains [`COMPLETION_TOKEN`] (any case) → `comprehensive`;
//!    - otherwise the trimmed response is the next question.

use crate::error::GenerationError;
use crate::heuristic::wants_to_end;
use crate::prompt::{COMPLETION_TOKEN, build_prompt_for_state};
use crate::traits::generator::TextGenerator;
use crate::types::{ConversationState, TerminationReason};
use std::sync::Arc;
use std::time::Duration;

/// Outcome of one conversation turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Continue { question: String },
    Stop { reason: TerminationReason },
}

impl Decision {
    pub fn should_continue(&self) -> bool {
        matches!(self, Decision::Continue { .. })
    }

    pub fn question(&self) -> Option<&str> {
        match self {
            Decision::Continue { question } => Some(question.as_str()),
            Decision::Stop { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<TerminationReason> {
        match self {
            Decision::Continue { .. } => None,
            Decision::Stop { reason } => Some(*reason),
        }
    }

    fn stop(reason: TerminationReason) -> Self {
        Decision::Stop { reason }
    }
}

/// Stateless decision engine. Cheap to clone; share one per process.
#[derive(Clone)]
pub struct FollowUpEngine {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl FollowUpEngine {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    pub async fn decide(&self, state: &ConversationState, latest_response: &str) -> Decision {
        if wants_to_end(latest_response) {
            tracing::debug!(question_id = %state.question.id, "reviewer signalled completion");
            return Decision::stop(TerminationReason::UserDone);
        }

        if state.budget_exhausted() {
            tracing::debug!(question_id = %state.question.id, "follow-up budget exhausted");
            return Decision::stop(TerminationReason::MaxReached);
        }

        let prompt = build_prompt_for_state(state, latest_response);

        let generated = match tokio::time::timeout(self.timeout, self.generator.generate(&prompt))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.timeout)),
        };

        let text = match generated {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(
                    question_id = %state.question.id,
                    error = %err,
                    "follow-up generation failed; ending conversation"
                );
                return Decision::stop(TerminationReason::Error);
            }
        };

        if text
            .to_lowercase()
            .contains(&COMPLETION_TOKEN.to_lowercase())
        {
            tracing::debug!(question_id = %state.question.id, "model judged feedback comprehensive");
            return Decision::stop(TerminationReason::Comprehensive);
        }

        let question = text.trim();
        if question.is_empty() {
            tracing::warn!(question_id = %state.question.id, "model returned empty follow-up");
            return Decision::stop(TerminationReason::Error);
        }

        Decision::Continue {
            question: question.to_string(),
        }
    }
}
