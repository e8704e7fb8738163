//! Text-generation collaborator.
//!
//! The orchestrator only ever sees [`TextGenerator`]: one prompt in, one
//! block of text out. Transport details stay behind the trait.

mod gemini;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::prompt::extract_initial_feedback;

pub use gemini::{GeminiClient, GeminiClientConfig};

/// Generation errors
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("http error: {0}")]
    Http(String),
    #[error("response error: {0}")]
    Response(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("no API key configured (set GEMINI_API_KEY or pass --api-key)")]
    MissingApiKey,
}

/// Request/response text generation
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl TextGenerator for Arc<dyn TextGenerator> {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        (**self).generate(prompt).await
    }
}

/// Offline generator that hands back the initial feedback block of the prompt
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoGenerator;

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        extract_initial_feedback(prompt)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| LlmError::Response("prompt has no initial feedback block".to_string()))
    }
}
