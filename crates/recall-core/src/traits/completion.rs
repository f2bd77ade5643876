//! The external chat-completion capability

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entry::MemoryEntry;

/// Completes a flat ordered prompt sequence into a single reply.
///
/// Entries are interpreted role-keyed (`"user"` / `"assistant"` /
/// `"system"`). Used by the summarizing store (through a summarizer) and by
/// the chat adapter.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(
        &self,
        messages: &[MemoryEntry],
        config: Option<&CompletionConfig>,
    ) -> Result<CompletionResponse, CompletionError>;

    fn model_name(&self) -> &str;
}

/// Per-call sampling parameters. All fields optional; the provider's
/// defaults apply when unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl CompletionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }
}

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub model: Option<String>,
}

impl CompletionResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("rate limit exceeded")]
    RateLimit,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("malformed response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Other(String),
}
