//! OpenAI-compatible HTTP backends for completions and embeddings

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use recall_core::{
    CompletionConfig, CompletionError, CompletionModel, CompletionResponse, EmbeddingError,
    EmbeddingProvider, MemoryEntry,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

fn build_client(timeout: Duration) -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| e.to_string())
}

fn api_key_from_env() -> Result<String, String> {
    std::env::var(API_KEY_ENV_VAR)
        .map_err(|_| format!("API key not found in environment variable {}", API_KEY_ENV_VAR))
}

/// Chat-completion client for the OpenAI API and compatible servers.
///
/// Credentials and endpoint are explicit constructor state; nothing is read
/// from ambient globals after construction. Requests carry a client-level
/// timeout so a stalled service surfaces as a typed error instead of
/// hanging.
pub struct OpenAiCompletionModel {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiCompletionModel {
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, CompletionError> {
        Ok(Self {
            client: build_client(DEFAULT_TIMEOUT).map_err(CompletionError::Config)?,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Reads the API key from `OPENAI_API_KEY`.
    pub fn from_env(model: impl Into<String>) -> Result<Self, CompletionError> {
        let api_key = api_key_from_env().map_err(CompletionError::Config)?;
        Self::new(model, api_key)
    }

    /// Points the client at an OpenAI-compatible server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, CompletionError> {
        self.client = build_client(timeout).map_err(CompletionError::Config)?;
        Ok(self)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionModel for OpenAiCompletionModel {
    async fn complete(
        &self,
        messages: &[MemoryEntry],
        config: Option<&CompletionConfig>,
    ) -> Result<CompletionResponse, CompletionError> {
        let request = ChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: &m.key,
                    content: &m.content,
                })
                .collect(),
            temperature: config.and_then(|c| c.temperature),
            max_tokens: config.and_then(|c| c.max_tokens),
            top_p: config.and_then(|c| c.top_p),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(CompletionError::RateLimit);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "completion request failed");
            return Err(CompletionError::Api {
                message,
                status: Some(status.as_u16()),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CompletionError::InvalidResponse("response held no choices".into()))?;

        let model = parsed.model.unwrap_or_else(|| self.model.clone());
        Ok(CompletionResponse::new(content).with_model(model))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Embedding client for the OpenAI API and compatible servers.
///
/// The index dimension is fixed at construction and reported through
/// [`EmbeddingProvider::dimension`]; a server returning vectors of another
/// length is surfaced by the semantic store as a dimension mismatch.
pub struct OpenAiEmbeddings {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    dimension: usize,
}

impl OpenAiEmbeddings {
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        dimension: usize,
    ) -> Result<Self, EmbeddingError> {
        Ok(Self {
            client: build_client(DEFAULT_TIMEOUT).map_err(EmbeddingError::Config)?,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            dimension,
        })
    }

    /// Reads the API key from `OPENAI_API_KEY`.
    pub fn from_env(model: impl Into<String>, dimension: usize) -> Result<Self, EmbeddingError> {
        let api_key = api_key_from_env().map_err(EmbeddingError::Config)?;
        Self::new(model, api_key, dimension)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "embedding request failed");
            return Err(EmbeddingError::Api {
                message,
                status: Some(status.as_u16()),
            });
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::InvalidResponse("response held no embedding".into()))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
