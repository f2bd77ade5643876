//! The polymorphic store contract

use async_trait::async_trait;

use crate::entry::MemoryEntry;
use crate::error::Result;

/// Common interface every memory backend satisfies.
///
/// Implementations take `&self` and serialize their own mutations internally,
/// so stores can be shared behind `Arc` without an outer lock. `query` is a
/// read, but callers must not assume it is side-effect-free across all
/// variants: a decorating store may perform lazy maintenance.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Records one entry. The entry is visible to subsequent `query` calls as
    /// soon as this returns.
    async fn add(&self, entry: MemoryEntry) -> Result<()>;

    /// Returns at most `top_k` entries. Ranking is implementation-defined
    /// (most-recent-first, similarity-ranked, ...). `top_k == 0` and queries
    /// against an empty store yield an empty `Vec`, never an error.
    async fn query(&self, query: &str, top_k: usize) -> Result<Vec<MemoryEntry>>;

    /// Manual compaction trigger. A no-op is a valid implementation.
    async fn summarize(&self) -> Result<()> {
        Ok(())
    }

    /// Removes up to `count` oldest entries and returns them in eviction
    /// order. Stores without positional removal (append-only indexes) return
    /// an empty `Vec`.
    async fn remove_oldest(&self, _count: usize) -> Result<Vec<MemoryEntry>> {
        Ok(vec![])
    }

    /// Drops every entry.
    async fn clear(&self) -> Result<()>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
