//! Error taxonomy for the memory layer

use thiserror::Error;

use crate::traits::completion::CompletionError;
use crate::traits::embedding::EmbeddingError;

/// Result type alias used across the workspace.
pub type Result<T> = std::result::Result<T, MemoryError>;

#[derive(Debug, Error)]
pub enum MemoryError {
    /// A buffer was constructed with a capacity that can never hold an entry.
    /// Construction-time misconfiguration fails fast and is not retried.
    #[error("invalid buffer capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    #[error("embedding service error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("summarization service error: {0}")]
    Summarization(String),

    /// A vector whose length differs from the index's configured dimension.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("completion service error: {0}")]
    Completion(#[from] CompletionError),

    /// Fact-store backend failure (I/O, SQL). A missing key is not an error.
    #[error("storage error: {0}")]
    Storage(String),
}
