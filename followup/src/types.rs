//! Conversation data types shared by the heuristic, prompt composer, engine, and HTTP layer.
//!
//! All types serialize in camelCase, matching what the slide client sends.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One block of background material shown alongside a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSection {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Describes one question being asked of a reviewer.
///
/// Treated as immutable for the lifetime of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuestionConfig {
    #[serde(default)]
    pub id: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub context_sections: Vec<ContextSection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The person answering the question.
    #[serde(alias = "user")]
    Reviewer,
    /// A follow-up question produced by the engine.
    #[serde(alias = "assistant")]
    Engine,
}

/// A single line of the dialogue transcript. Order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ConversationMessage {
    pub fn reviewer(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Reviewer,
            content: content.into(),
        }
    }

    pub fn engine(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Engine,
            content: content.into(),
        }
    }
}

/// Why a conversation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// The model judged the reviewer's answers complete.
    Comprehensive,
    /// The follow-up budget was exhausted.
    MaxReached,
    /// The reviewer said they had nothing more to add.
    UserDone,
    /// The model was unavailable or failed.
    Error,
}

impl TerminationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationReason::Comprehensive => "comprehensive",
            TerminationReason::MaxReached => "max_reached",
            TerminationReason::UserDone => "user_done",
            TerminationReason::Error => "error",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-flight state of one conversation, rebuilt from the request on every turn.
///
/// `history` holds every message *before* the latest reviewer response.
#[derive(Debug, Clone)]
pub struct ConversationState {
    pub question: FeedbackQuestionConfig,
    pub history: Vec<ConversationMessage>,
    pub remaining_follow_ups: u32,
}

impl ConversationState {
    pub fn new(
        question: FeedbackQuestionConfig,
        history: Vec<ConversationMessage>,
        remaining_follow_ups: u32,
    ) -> Self {
        Self {
            question,
            history,
            remaining_follow_ups,
        }
    }

    /// True once the budget is spent; the next decision must terminate.
    pub fn budget_exhausted(&self) -> bool {
        self.remaining_follow_ups == 0
    }
}
