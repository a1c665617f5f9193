//! # Follow-up Library
//!
//! Decides, one reviewer turn at a time, whether to ask a clarifying follow-up
//! question about a slide or to close the exchange.
//!
//! ## Key Concepts
//! - **Completion heuristic** ([`heuristic`]): cheap keyword check for an explicit "I'm done".
//! - **Prompt composer** ([`prompt`]): pure construction of the instruction sent to the model.
//! - **Text generator** ([`traits::generator`]): the language-model collaborator seam,
//!   with a Gemini implementation in [`generators::gemini`].
//! - **Engine** ([`engine`]): combines the above into a single terminal-or-continue [`Decision`].
//!
//! The engine holds no conversation state between calls. Every call receives the full
//! history from the client.

pub mod engine;
pub mod error;
pub mod generators;
pub mod heuristic;
pub mod prompt;
pub mod traits;
pub mod types;

pub use engine::{Decision, FollowUpEngine};
pub use error::GenerationError;
pub use traits::generator::TextGenerator;
pub use types::{
    ContextSection, ConversationMessage, ConversationState, FeedbackQuestionConfig, MessageRole,
    TerminationReason,
};
