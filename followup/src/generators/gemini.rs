//! # Gemini Generator
//!
//! [`TextGenerator`] backed by Google's Gemini `generateContent` endpoint.
//!
//! ## Environment
//!
//! - `GEMINI_API_KEY` authenticates requests. An empty key yields
//!   [`GenerationError::NotConfigured`] from [`GeminiGenerator::new`].
//! - `GEMINI_MODEL` selects the model (defaults to `gemini-2.5-flash`).
//!
//! Thinking is disabled (`thinking_budget = 0`) to keep a single follow-up decision fast.

use crate::error::GenerationError;
use crate::traits::generator::TextGenerator;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

/// Request body for the Gemini API.
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Serialize)]
struct ThinkingConfig {
    thinking_budget: u32,
}

/// Response from the Gemini API.
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: String,
}

impl GeminiGenerator {
    /// Builds a generator with a client whose whole-request timeout is `timeout`.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerationError::NotConfigured);
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            model: model.into(),
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Points the generator at a different host (used against local stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }
}

/// Extracts the concatenated text of the first candidate.
fn extract_text(body: &str) -> Result<String, GenerationError> {
    let response = serde_json::from_str::<GeminiResponse>(body)
        .map_err(|e| GenerationError::Malformed(format!("error decoding response body: {e}")))?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| {
            c.parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::Malformed(
            "response contained no candidate text".into(),
        ));
    }
    Ok(text)
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request_body = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            }),
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: body.chars().take(300).collect(),
            });
        }

        extract_text(&body)
    }
}
