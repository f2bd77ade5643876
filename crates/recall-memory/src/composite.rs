//! Composite store merging recency and semantic retrieval

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use recall_core::{FactStore, MemoryEntry, MemoryStore, Result};

/// Which sub-stores a composite query fans out to. Both are on by default.
#[derive(Debug, Clone, Copy)]
pub struct QuerySources {
    pub semantic: bool,
    pub recency: bool,
}

impl Default for QuerySources {
    fn default() -> Self {
        Self {
            semantic: true,
            recency: true,
        }
    }
}

impl QuerySources {
    pub fn semantic_only() -> Self {
        Self {
            semantic: true,
            recency: false,
        }
    }

    pub fn recency_only() -> Self {
        Self {
            semantic: false,
            recency: true,
        }
    }
}

/// Merges a recency-oriented store, a semantic store, and an optional
/// key-value fact store behind one [`MemoryStore`].
///
/// `add` fans the entry out to both sub-stores with no transactionality: a
/// semantic-side failure after a successful recency write leaves the two
/// divergent (accepted limitation; the error still propagates). `query` runs
/// the semantic sub-query first, then recency, de-duplicates first-seen-wins
/// and truncates to `top_k`.
///
/// The de-duplication key is the `(key, content)` pair, so a turn fanned out
/// to both sub-stores collapses to one result while unrelated entries that
/// merely share a role string ("user"/"assistant") stay distinct.
///
/// Sub-stores are referenced, not owned; they may be shared with other
/// composites.
pub struct CompositeStore {
    recency: Arc<dyn MemoryStore>,
    semantic: Arc<dyn MemoryStore>,
    facts: Option<Arc<dyn FactStore>>,
}

impl CompositeStore {
    pub fn new(recency: Arc<dyn MemoryStore>, semantic: Arc<dyn MemoryStore>) -> Self {
        Self {
            recency,
            semantic,
            facts: None,
        }
    }

    pub fn with_facts(mut self, facts: Arc<dyn FactStore>) -> Self {
        self.facts = Some(facts);
        self
    }

    /// Top-k semantically relevant entries, with content recovered from the
    /// stored metadata.
    pub async fn query_semantic(&self, query: &str, top_k: usize) -> Result<Vec<MemoryEntry>> {
        let results = self.semantic.query(query, top_k).await?;
        Ok(results
            .into_iter()
            .map(|e| {
                let content = e.display_text().to_string();
                MemoryEntry { content, ..e }
            })
            .collect())
    }

    /// Top-k most recent entries.
    pub async fn query_recency(&self, top_k: usize) -> Result<Vec<MemoryEntry>> {
        self.recency.query("", top_k).await
    }

    /// Retrieval across the selected sources, semantic first, de-duplicated
    /// by `(key, content)`, truncated to `top_k`.
    pub async fn query_with(
        &self,
        query: &str,
        top_k: usize,
        sources: QuerySources,
    ) -> Result<Vec<MemoryEntry>> {
        let mut merged: Vec<MemoryEntry> = Vec::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        if sources.semantic {
            for entry in self.query_semantic(query, top_k).await? {
                if seen.insert((entry.key.clone(), entry.content.clone())) {
                    merged.push(entry);
                }
            }
        }

        if sources.recency {
            for entry in self.query_recency(top_k).await? {
                if seen.insert((entry.key.clone(), entry.content.clone())) {
                    merged.push(entry);
                }
            }
        }

        merged.truncate(top_k);
        Ok(merged)
    }

    /// Stores a durable fact. No-op when no fact store was attached.
    pub async fn fact_set(&self, key: &str, value: &str) -> Result<()> {
        match &self.facts {
            Some(facts) => facts.set(key, value).await,
            None => Ok(()),
        }
    }

    /// Looks up a durable fact. `None` when absent or when no fact store was
    /// attached.
    pub async fn fact_get(&self, key: &str) -> Result<Option<String>> {
        match &self.facts {
            Some(facts) => facts.get(key).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl MemoryStore for CompositeStore {
    async fn add(&self, entry: MemoryEntry) -> Result<()> {
        self.recency.add(entry.clone()).await?;
        self.semantic.add(entry).await?;
        Ok(())
    }

    async fn query(&self, query: &str, top_k: usize) -> Result<Vec<MemoryEntry>> {
        self.query_with(query, top_k, QuerySources::default()).await
    }

    /// Delegates to the recency sub-store's compaction (a no-op for stores
    /// without one).
    async fn summarize(&self) -> Result<()> {
        self.recency.summarize().await
    }

    async fn clear(&self) -> Result<()> {
        self.recency.clear().await?;
        self.semantic.clear().await?;
        Ok(())
    }

    /// The conversation-log length, i.e. the recency sub-store's size.
    fn len(&self) -> usize {
        self.recency.len()
    }
}
