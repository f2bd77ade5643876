use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use recall_core::{EmbeddingProvider, MemoryEntry, MemoryError, MemoryStore, Metadata, Result};

/// Embedding-indexed nearest-neighbor store.
///
/// Keys are unique identifiers for the embedded items. `add` embeds the
/// content and appends vector and `(key, metadata)` record together; `query`
/// embeds the query text and ranks by squared Euclidean distance, nearest
/// first. The index is append-only: there is no deletion or update path, and
/// `remove_oldest` returns nothing.
///
/// Query results carry the stored key and metadata with empty content; the
/// original text is recovered through the reserved `"text"` metadata key (or
/// the `"content"` default written when no metadata was supplied).
pub struct SemanticStore {
    embedder: Arc<dyn EmbeddingProvider>,
    dimension: usize,
    index: RwLock<Index>,
}

#[derive(Default)]
struct Index {
    vectors: Vec<Vec<f32>>,
    records: Vec<(String, Metadata)>,
}

impl SemanticStore {
    /// Creates a store indexing vectors of the embedder's fixed dimension.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        let dimension = embedder.dimension();
        Self {
            embedder,
            dimension,
            index: RwLock::new(Index::default()),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Embeds `text` and rejects vectors that do not match the configured
    /// dimension before any state is touched.
    async fn embed_checked(&self, text: &str) -> Result<Vec<f32>> {
        let vector = self.embedder.embed(text).await?;
        if vector.len() != self.dimension {
            return Err(MemoryError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        Ok(vector)
    }
}

fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[async_trait]
impl MemoryStore for SemanticStore {
    async fn add(&self, entry: MemoryEntry) -> Result<()> {
        let vector = self.embed_checked(&entry.content).await?;

        let metadata = if entry.metadata.is_empty() {
            let mut metadata = Metadata::new();
            metadata.insert("content".into(), entry.content.clone().into());
            metadata
        } else {
            entry.metadata
        };

        // Vector and record are pushed under one lock so the two lists stay
        // index-aligned.
        let mut index = self.index.write();
        index.vectors.push(vector);
        index.records.push((entry.key, metadata));
        tracing::debug!(size = index.records.len(), "indexed entry");
        Ok(())
    }

    async fn query(&self, query: &str, top_k: usize) -> Result<Vec<MemoryEntry>> {
        if top_k == 0 || self.is_empty() {
            return Ok(vec![]);
        }

        let query_vector = self.embed_checked(query).await?;

        let index = self.index.read();
        let mut ranked: Vec<(f32, usize)> = index
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (squared_distance(&query_vector, v), i))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(ranked
            .into_iter()
            .take(top_k)
            .map(|(_, i)| {
                let (key, metadata) = &index.records[i];
                MemoryEntry::new(key.clone(), "").with_metadata(metadata.clone())
            })
            .collect())
    }

    async fn clear(&self) -> Result<()> {
        let mut index = self.index.write();
        index.vectors.clear();
        index.records.clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.index.read().records.len()
    }
}
