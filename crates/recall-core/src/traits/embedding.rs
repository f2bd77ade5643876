//! The external embedding capability

use async_trait::async_trait;
use thiserror::Error;

/// Embeds text into fixed-dimension vectors.
///
/// Consumed by the semantic store for both indexing and querying. The
/// provider is passed in at construction; stores never reach for ambient
/// client state.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// The fixed output dimension of this provider.
    fn dimension(&self) -> usize;
}

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("malformed response: {0}")]
    InvalidResponse(String),
}
