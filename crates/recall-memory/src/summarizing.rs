//! Threshold-triggered summarizing decorator

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use recall_core::{MemoryEntry, MemoryStore, Result};

use crate::summarizer::Summarizer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizingConfig {
    /// Compaction runs once the inner store holds strictly more than this
    /// many entries.
    #[serde(default = "default_threshold")]
    pub threshold: usize,

    /// How many oldest entries each compaction folds into one summary.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_threshold() -> usize {
    20
}

fn default_chunk_size() -> usize {
    5
}

impl Default for SummarizingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl SummarizingConfig {
    pub fn new(threshold: usize, chunk_size: usize) -> Self {
        Self {
            threshold,
            chunk_size,
        }
    }
}

/// Decorates an inner store with threshold-crossing compaction.
///
/// After each `add`, if the inner store holds more than `threshold` entries,
/// the oldest `chunk_size` are condensed by the injected [`Summarizer`] into
/// one synthetic `"system"` entry. The trigger is an edge, not a steady-state
/// invariant: each compaction shrinks the store by `chunk_size - 1`, and
/// repeated triggers across successive adds are expected.
///
/// The summarizer runs before anything is removed, so a failed external call
/// propagates with the inner store still holding its pre-truncation contents.
///
/// The inner store must support positional removal (`remove_oldest`), i.e. a
/// recency-ordered log such as [`crate::RecencyBuffer`]; append-only indexes
/// cannot be compacted.
///
/// `add` is a read-modify-write spanning several inner calls; the reference
/// model is a single cooperative writer. Concurrent writers on the same store
/// must be serialized by the caller.
pub struct SummarizingStore {
    inner: Arc<dyn MemoryStore>,
    summarizer: Arc<dyn Summarizer>,
    config: SummarizingConfig,
}

impl SummarizingStore {
    pub fn new(
        inner: Arc<dyn MemoryStore>,
        summarizer: Arc<dyn Summarizer>,
        config: SummarizingConfig,
    ) -> Self {
        let config = SummarizingConfig {
            chunk_size: config.chunk_size.max(1),
            ..config
        };
        Self {
            inner,
            summarizer,
            config,
        }
    }

    pub fn with_default_config(
        inner: Arc<dyn MemoryStore>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self::new(inner, summarizer, SummarizingConfig::default())
    }

    pub fn config(&self) -> &SummarizingConfig {
        &self.config
    }

    /// Folds the oldest `chunk_size` entries into one summary entry sitting
    /// where they used to be. No-op on an empty inner store.
    async fn compact_once(&self) -> Result<()> {
        let total = self.inner.len();
        if total == 0 {
            return Ok(());
        }

        let chunk_size = self.config.chunk_size.min(total);
        let entries = self.inner.query("", total).await?;
        let (oldest, survivors) = entries.split_at(chunk_size.min(entries.len()));

        let summary = match self.summarizer.summarize(oldest).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(error = %e, "summarizer failed, keeping entries untruncated");
                return Err(e);
            }
        };

        // The summary replaces the entries it condensed, so it goes first and
        // the surviving entries keep their chronological order.
        self.inner.remove_oldest(total).await?;
        self.inner.add(MemoryEntry::system(summary)).await?;
        for entry in survivors {
            self.inner.add(entry.clone()).await?;
        }
        tracing::debug!(
            compacted = chunk_size,
            remaining = self.inner.len(),
            "condensed oldest entries into summary"
        );
        Ok(())
    }
}

#[async_trait]
impl MemoryStore for SummarizingStore {
    async fn add(&self, entry: MemoryEntry) -> Result<()> {
        self.inner.add(entry).await?;

        let recent = self.inner.query("", self.config.threshold + 1).await?;
        if recent.len() > self.config.threshold {
            self.compact_once().await?;
        }
        Ok(())
    }

    async fn query(&self, query: &str, top_k: usize) -> Result<Vec<MemoryEntry>> {
        self.inner.query(query, top_k).await
    }

    /// Manual compaction: runs one compaction step regardless of threshold.
    async fn summarize(&self) -> Result<()> {
        self.compact_once().await
    }

    async fn remove_oldest(&self, count: usize) -> Result<Vec<MemoryEntry>> {
        self.inner.remove_oldest(count).await
    }

    async fn clear(&self) -> Result<()> {
        self.inner.clear().await
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
