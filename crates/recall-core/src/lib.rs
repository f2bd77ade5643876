//! Core types and traits for the recall memory layer

pub mod entry;
pub mod error;
pub mod traits;

pub use entry::{KEY_ASSISTANT, KEY_SYSTEM, KEY_USER, META_TEXT, Metadata, MemoryEntry};
pub use error::{MemoryError, Result};
pub use traits::completion::{
    CompletionConfig, CompletionError, CompletionModel, CompletionResponse,
};
pub use traits::embedding::{EmbeddingError, EmbeddingProvider};
pub use traits::facts::FactStore;
pub use traits::store::MemoryStore;
