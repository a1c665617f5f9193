//!
//! # Text Generator Trait
//!
//! The engine depends on a language model only through [`TextGenerator`]: given a
//! prompt, return generated text. Implementations own their transport, credentials,
//! and response decoding. Tests substitute scripted implementations.
//!

use crate::error::GenerationError;
use async_trait::async_trait;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` to the model and returns its raw text output.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
