//! Completion and embedding service adapters for the recall memory layer

mod chat;
mod mock;
mod openai;

pub use recall_core::{
    CompletionConfig, CompletionError, CompletionModel, CompletionResponse, EmbeddingError,
    EmbeddingProvider, MemoryEntry,
};

pub use chat::ChatAdapter;
pub use mock::{MockCompletionModel, MockEmbedder};
pub use openai::{DEFAULT_BASE_URL, OpenAiCompletionModel, OpenAiEmbeddings};
