//! Memory stores for the recall memory layer
//!
//! Four [`MemoryStore`] variants: a fixed-capacity [`RecencyBuffer`], an
//! embedding-indexed [`SemanticStore`], a threshold-triggered
//! [`SummarizingStore`] decorator, and a [`CompositeStore`] that merges a
//! recency-like store with a semantic one.

mod composite;
mod recency;
mod semantic;
mod summarizer;
mod summarizing;

pub use recall_core::{MemoryEntry, MemoryStore, Metadata, Result};

pub use composite::{CompositeStore, QuerySources};
pub use recency::RecencyBuffer;
pub use semantic::SemanticStore;
pub use summarizer::{DEFAULT_SUMMARY_PROMPT, LlmSummarizer, NoopSummarizer, Summarizer};
pub use summarizing::{SummarizingConfig, SummarizingStore};
